//! # Curve Fitting
//!
//! Smooth, continuously evaluable curves through streamline anchors.
//!
//! Positions come from a centripetal Catmull-Rom spline. The curve parameter
//! `t ∈ [0, 1]` is the arc-length fraction, resolved through a cumulative
//! length table. Orientation frames are parallel-transported along that
//! table rather than recomputed per point, so normals never flip at
//! inflections or straight runs.

mod frame;
mod spline;

pub use frame::Frame;

use config::constants::{approx_zero, ARC_LENGTH_DIVISIONS_PER_SPAN};
use flow_field::Streamline;
use glam::DVec3;

use frame::{direction, orthonormalize, perpendicular, rotate_about, signed_angle, transport};
use spline::CatmullRom;

/// A smooth curve with twist-free frames.
///
/// # Example
///
/// ```rust
/// use flow_field::Streamline;
/// use flow_mesh::Curve;
/// use glam::DVec3;
///
/// let line = Streamline::from_points(vec![DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0)]);
/// let curve = Curve::fit(&line, false);
///
/// let frame = curve.frame(0.5);
/// assert!((frame.position.z - 1.0).abs() < 1e-9);
/// assert!((frame.tangent - DVec3::Z).length() < 1e-9);
/// assert!(frame.normal.dot(frame.tangent).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Curve {
    spline: CatmullRom,
    closed: bool,
    /// Cumulative length at `u = i / divisions`.
    arc_lengths: Vec<f64>,
    /// Transported frames at the same nodes.
    nodes: Vec<Frame>,
    /// Seam twist correction per node (closed curves only).
    twist_step: f64,
}

impl Curve {
    /// Fits a curve through a streamline's anchors.
    ///
    /// A closed curve wraps from the last anchor back to the first.
    pub fn fit(streamline: &Streamline, closed: bool) -> Self {
        Self::through(streamline.points(), closed)
    }

    /// Fits a curve through arbitrary anchor points.
    ///
    /// Fewer than two anchors degenerate to a zero-length curve.
    pub fn through(points: &[DVec3], closed: bool) -> Self {
        let padded;
        let anchors = if points.len() >= 2 {
            points
        } else {
            let p = points.first().copied().unwrap_or(DVec3::ZERO);
            padded = [p, p];
            &padded[..]
        };

        let spline = CatmullRom::new(anchors, closed);
        let divisions = spline.span_count() * ARC_LENGTH_DIVISIONS_PER_SPAN;
        let samples: Vec<DVec3> = (0..=divisions)
            .map(|i| spline.point(i as f64 / divisions as f64))
            .collect();

        let mut arc_lengths = Vec::with_capacity(samples.len());
        let mut total = 0.0;
        arc_lengths.push(total);
        for pair in samples.windows(2) {
            total += pair[0].distance(pair[1]);
            arc_lengths.push(total);
        }

        let default_tangent = anchors
            .windows(2)
            .find_map(|w| direction(w[1] - w[0]))
            .unwrap_or(DVec3::Z);

        let mut nodes: Vec<Frame> = Vec::with_capacity(samples.len());
        for (i, position) in samples.iter().enumerate() {
            let u = i as f64 / divisions as f64;
            let fallback = nodes.last().map_or(default_tangent, |prev| prev.tangent);
            let tangent = tangent_at(&spline, u, fallback);
            let normal = match nodes.last() {
                Some(prev) => transport(prev.normal, prev.tangent, tangent),
                None => perpendicular(tangent),
            };
            nodes.push(orthonormalize(*position, tangent, normal));
        }

        let mut twist_step = 0.0;
        if closed {
            if let (Some(first), Some(last)) = (nodes.first().copied(), nodes.last().copied()) {
                let arrived = transport(last.normal, last.tangent, first.tangent);
                let twist = signed_angle(arrived, first.normal, first.tangent);
                twist_step = twist / divisions as f64;
                for (i, node) in nodes.iter_mut().enumerate() {
                    let normal = rotate_about(node.normal, node.tangent, twist_step * i as f64);
                    *node = orthonormalize(node.position, node.tangent, normal);
                }
            }
        }

        Self {
            spline,
            closed,
            arc_lengths,
            nodes,
            twist_step,
        }
    }

    /// Returns true if the curve loops back to its start.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Approximate arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Position at arc-length fraction `t`.
    pub fn position(&self, t: f64) -> DVec3 {
        self.spline.point(self.parameter_at(t))
    }

    /// Unit tangent at arc-length fraction `t`.
    pub fn tangent(&self, t: f64) -> DVec3 {
        self.frame(t).tangent
    }

    /// Full frame at arc-length fraction `t`.
    pub fn frame(&self, t: f64) -> Frame {
        let u = self.parameter_at(t);
        let divisions = self.divisions();
        let scaled = u * divisions as f64;
        let k = (scaled.floor() as usize).min(divisions - 1);
        let frac = scaled - k as f64;

        let node = self.nodes[k];
        let position = self.spline.point(u);
        let tangent = tangent_at(&self.spline, u, node.tangent);
        let normal = transport(node.normal, node.tangent, tangent);
        let normal = rotate_about(normal, tangent, self.twist_step * frac);
        orthonormalize(position, tangent, normal)
    }

    /// Number of arc-length table intervals.
    #[inline]
    fn divisions(&self) -> usize {
        self.arc_lengths.len() - 1
    }

    /// Maps an arc-length fraction to the spline's span parameter.
    fn parameter_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let total = self.length();
        if approx_zero(total) {
            return t;
        }

        let divisions = self.divisions();
        let target = t * total;
        let i = self
            .arc_lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(divisions - 1);

        let start = self.arc_lengths[i];
        let span = self.arc_lengths[i + 1] - start;
        let frac = if span > 0.0 {
            ((target - start) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f64 + frac) / divisions as f64
    }
}

/// Unit tangent at span parameter `u`, falling back to the span chord and
/// then to `fallback` where the spline has no direction.
fn tangent_at(spline: &CatmullRom, u: f64, fallback: DVec3) -> DVec3 {
    direction(spline.derivative(u))
        .or_else(|| direction(spline.chord(u)))
        .unwrap_or(fallback)
}
