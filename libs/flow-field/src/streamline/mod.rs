//! # Streamline Integration
//!
//! Explicit-Euler advection of a seed point through a [`FlowField`]:
//!
//! ```text
//! point[0]   = seed
//! point[i+1] = point[i] + stepLength · field(point[i] / noiseScale)
//! ```

use glam::DVec3;

use crate::field::FlowField;
use crate::params::GenerationParameters;

/// Ordered anchor points produced by one integration.
///
/// A streamline holds `stepsPerStreamline + 1` points. Consecutive points
/// may coincide where the field vanishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Streamline {
    points: Vec<DVec3>,
}

impl Streamline {
    /// Wraps an existing point sequence.
    pub fn from_points(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Returns the anchor points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns the number of anchor points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the streamline has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total polyline length through the anchors.
    pub fn polyline_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Integrates a streamline from `seed`.
///
/// Always returns exactly `params.steps_per_streamline + 1` points. The
/// parameters are expected to be validated; integration itself cannot fail.
///
/// # Example
///
/// ```rust
/// use flow_field::{integrate, GenerationParameters, UniformFlow};
/// use glam::DVec3;
///
/// let params = GenerationParameters {
///     steps_per_streamline: 4,
///     step_length: 0.5,
///     ..GenerationParameters::default()
/// };
/// let line = integrate(&UniformFlow(DVec3::X), DVec3::ZERO, &params);
/// assert_eq!(line.len(), 5);
/// assert_eq!(line.points()[4], DVec3::new(2.0, 0.0, 0.0));
/// ```
pub fn integrate<F>(field: &F, seed: DVec3, params: &GenerationParameters) -> Streamline
where
    F: FlowField + ?Sized,
{
    let steps = params.steps_per_streamline as usize;
    let mut points = Vec::with_capacity(steps + 1);

    let mut current = seed;
    points.push(current);
    for _ in 0..steps {
        current += params.step_length * field.velocity(current / params.noise_scale);
        points.push(current);
    }

    Streamline { points }
}

#[cfg(test)]
mod tests;
