//! # Tube Tessellation
//!
//! Sweeps a circular cross-section along a [`Curve`].
//!
//! A tube holds `tubular_segments + 1` rings of `radial_segments` vertices.
//! Ring `i` sits at curve parameter `i / tubular_segments` (open) or
//! `i / (tubular_segments + 1)` (closed, where the last ring connects back
//! to the first instead of duplicating it). Texture `u` equals the ring's
//! curve parameter, so a closed tube's spacing stays uniform across the
//! closing band.

use std::f64::consts::TAU;

use config::constants::{MAX_VERTICES, MIN_RADIAL_SEGMENTS, MIN_TUBULAR_SEGMENTS};
use flow_field::FieldError;
use glam::{DVec2, DVec3};

use crate::curve::Curve;
use crate::error::{MeshError, MeshResult};
use crate::mesh::{MeshBuffers, RingLayout};

/// Tessellated tube around one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    layout: RingLayout,
    rings: u32,
    buffers: MeshBuffers,
}

impl TubeMesh {
    /// Returns the ring layout shared by every ring.
    #[inline]
    pub fn layout(&self) -> RingLayout {
        self.layout
    }

    /// Returns the number of rings.
    #[inline]
    pub fn ring_count(&self) -> u32 {
        self.rings
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }

    /// Returns the vertex and index buffers.
    #[inline]
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    /// Consumes the tube, returning its buffers.
    pub fn into_buffers(self) -> MeshBuffers {
        self.buffers
    }
}

/// Builds a tube of constant radius around `curve`.
///
/// # Arguments
///
/// * `curve` - Centerline with twist-free frames
/// * `tube_radius` - Cross-section radius, positive
/// * `radial_segments` - Vertices per ring, at least 3
/// * `tubular_segments` - Segments along the curve, at least 1
/// * `closed` - Connect the last ring back to the first
///
/// # Example
///
/// ```rust
/// use flow_mesh::{build_tube, Curve};
/// use glam::DVec3;
///
/// let curve = Curve::through(&[DVec3::ZERO, DVec3::Z], false);
/// let tube = build_tube(&curve, 0.1, 8, 10, false).unwrap();
/// assert_eq!(tube.vertex_count(), 88);
/// assert_eq!(tube.index_count(), 480);
/// ```
pub fn build_tube(
    curve: &Curve,
    tube_radius: f64,
    radial_segments: u32,
    tubular_segments: u32,
    closed: bool,
) -> MeshResult<TubeMesh> {
    if radial_segments < MIN_RADIAL_SEGMENTS {
        return Err(FieldError::invalid_parameter(
            "radialSegments",
            format!(
                "must be at least {}, got {}",
                MIN_RADIAL_SEGMENTS, radial_segments
            ),
        )
        .into());
    }
    if tubular_segments < MIN_TUBULAR_SEGMENTS {
        return Err(FieldError::invalid_parameter(
            "tubularSegments",
            format!(
                "must be at least {}, got {}",
                MIN_TUBULAR_SEGMENTS, tubular_segments
            ),
        )
        .into());
    }
    if !tube_radius.is_finite() || tube_radius <= 0.0 {
        return Err(FieldError::invalid_parameter(
            "tubeRadius",
            format!("must be a positive finite number, got {}", tube_radius),
        )
        .into());
    }

    let radial = radial_segments as usize;
    let rings = tubular_segments as usize + 1;
    let vertex_count = radial * rings;
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTICES,
        });
    }

    let bands = tubular_segments as usize + usize::from(closed);
    let mut buffers = MeshBuffers::with_capacity(vertex_count, radial * bands * 2);

    // Closed tubes leave room for the wrap-around band
    let divisor = f64::from(tubular_segments) + if closed { 1.0 } else { 0.0 };
    let ring_angles: Vec<(f64, f64)> = (0..radial)
        .map(|j| (TAU * j as f64 / radial as f64).sin_cos())
        .collect();

    for i in 0..rings {
        // Texture u follows the sampling parameter
        let u = i as f64 / divisor;
        let frame = curve.frame(u);
        for (j, &(sin, cos)) in ring_angles.iter().enumerate() {
            let direction: DVec3 = frame.normal * cos + frame.binormal * sin;
            let v = j as f64 / radial as f64;
            buffers.add_vertex(
                frame.position + direction * tube_radius,
                direction,
                DVec2::new(u, v),
            );
        }
    }

    for i in 0..bands {
        let next = (i + 1) % rings;
        for j in 0..radial {
            let j_next = (j + 1) % radial;
            let a = (i * radial + j) as u32;
            let b = (next * radial + j) as u32;
            let c = (next * radial + j_next) as u32;
            let d = (i * radial + j_next) as u32;

            // Counter-clockwise seen from outside
            buffers.add_triangle(a, d, b);
            buffers.add_triangle(d, c, b);
        }
    }

    Ok(TubeMesh {
        layout: RingLayout {
            radial_segments,
            closed,
        },
        rings: rings as u32,
        buffers,
    })
}

#[cfg(test)]
mod tests;
