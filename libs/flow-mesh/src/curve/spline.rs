//! Centripetal Catmull-Rom spline through anchor points.

use config::constants::{CATMULL_ROM_ALPHA, MIN_KNOT_INTERVAL};
use glam::DVec3;

/// Cubic polynomial `c0 + c1·t + c2·t² + c3·t³` over one span, `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: DVec3,
    c1: DVec3,
    c2: DVec3,
    c3: DVec3,
}

impl Cubic {
    /// Hermite form from endpoint values and endpoint derivatives.
    fn hermite(x0: DVec3, x1: DVec3, t0: DVec3, t1: DVec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    /// Span that stays at `p` for its whole length.
    fn constant(p: DVec3) -> Self {
        Self::hermite(p, p, DVec3::ZERO, DVec3::ZERO)
    }

    /// Non-uniform Catmull-Rom span from `p1` to `p2` with knot intervals
    /// `dt0`, `dt1`, `dt2`.
    fn catmull_rom(p: [DVec3; 4], dt0: f64, dt1: f64, dt2: f64) -> Self {
        let [p0, p1, p2, p3] = p;
        let m1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let m2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;
        Self::hermite(p1, p2, m1 * dt1, m2 * dt1)
    }

    #[inline]
    fn value(&self, t: f64) -> DVec3 {
        ((self.c3 * t + self.c2) * t + self.c1) * t + self.c0
    }

    #[inline]
    fn derivative(&self, t: f64) -> DVec3 {
        (3.0 * self.c3 * t + 2.0 * self.c2) * t + self.c1
    }
}

/// Piecewise-cubic interpolant, parameterized uniformly per span by
/// `u ∈ [0, 1]`.
#[derive(Debug, Clone)]
pub(crate) struct CatmullRom {
    spans: Vec<Cubic>,
    chords: Vec<DVec3>,
}

impl CatmullRom {
    /// Fits a spline through `points` (at least two).
    ///
    /// Open splines extrapolate phantom end points by reflection; closed
    /// splines wrap around and add a span from the last anchor to the first.
    pub(crate) fn new(points: &[DVec3], closed: bool) -> Self {
        let n = points.len();
        let span_count = if closed { n } else { n - 1 };
        let anchor = |i: isize| -> DVec3 {
            if closed {
                points[i.rem_euclid(n as isize) as usize]
            } else if i < 0 {
                2.0 * points[0] - points[1]
            } else if i as usize >= n {
                2.0 * points[n - 1] - points[n - 2]
            } else {
                points[i as usize]
            }
        };

        let mut spans = Vec::with_capacity(span_count);
        let mut chords = Vec::with_capacity(span_count);
        for s in 0..span_count as isize {
            let p = [anchor(s - 1), anchor(s), anchor(s + 1), anchor(s + 2)];
            chords.push(p[2] - p[1]);

            let dt1 = knot_interval(p[1], p[2]);
            if dt1 < MIN_KNOT_INTERVAL {
                // Coincident ends: no overshoot past a fixed point
                spans.push(Cubic::constant(p[1]));
                continue;
            }
            let mut dt0 = knot_interval(p[0], p[1]);
            let mut dt2 = knot_interval(p[2], p[3]);
            if dt0 < MIN_KNOT_INTERVAL {
                dt0 = dt1;
            }
            if dt2 < MIN_KNOT_INTERVAL {
                dt2 = dt1;
            }

            spans.push(Cubic::catmull_rom(p, dt0, dt1, dt2));
        }

        Self { spans, chords }
    }

    /// Number of cubic spans.
    pub(crate) fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Maps a global parameter to `(span, local t)`.
    fn locate(&self, u: f64) -> (usize, f64) {
        let scaled = u.clamp(0.0, 1.0) * self.spans.len() as f64;
        let span = (scaled.floor() as usize).min(self.spans.len() - 1);
        (span, scaled - span as f64)
    }

    /// Position at global parameter `u`.
    pub(crate) fn point(&self, u: f64) -> DVec3 {
        let (span, t) = self.locate(u);
        self.spans[span].value(t)
    }

    /// Derivative direction at `u` (not normalized, may be zero).
    pub(crate) fn derivative(&self, u: f64) -> DVec3 {
        let (span, t) = self.locate(u);
        self.spans[span].derivative(t)
    }

    /// Straight chord of the span containing `u`.
    pub(crate) fn chord(&self, u: f64) -> DVec3 {
        let (span, _) = self.locate(u);
        self.chords[span]
    }
}

/// Centripetal knot spacing `|p1 - p0|^α`.
#[inline]
fn knot_interval(a: DVec3, b: DVec3) -> f64 {
    a.distance_squared(b).powf(CATMULL_ROM_ALPHA * 0.5)
}
