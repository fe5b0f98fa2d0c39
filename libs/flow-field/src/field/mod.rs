//! # Noise Field
//!
//! Scalar noise potentials and the curl operator that turns three
//! decorrelated potential channels into an (approximately) divergence-free
//! vector field.
//!
//! ## Curl
//!
//! ```text
//! curlX = ∂Nz/∂y − ∂Ny/∂z
//! curlY = ∂Nx/∂z − ∂Nz/∂x
//! curlZ = ∂Ny/∂x − ∂Nx/∂y
//! ```
//!
//! Each partial is a central difference of width `2ε`. The channels are the
//! same potential sampled at three fixed offsets.

use config::constants::{CURL_EPSILON, POTENTIAL_CHANNEL_OFFSETS};
use glam::DVec3;
use noise::{NoiseFn, OpenSimplex};
use std::fmt;

/// A vector field that streamlines are integrated through.
///
/// Implementations must be pure: the same position always yields the same
/// velocity. `Send + Sync` lets one field be shared by every worker of a
/// parallel batch.
pub trait FlowField: Send + Sync {
    /// Samples the field at a position given in noise space.
    fn velocity(&self, position: DVec3) -> DVec3;
}

/// A deterministic, continuous scalar function of position.
pub trait ScalarPotential: Send + Sync {
    /// Samples the potential.
    fn potential(&self, position: DVec3) -> f64;
}

// =============================================================================
// SIMPLEX POTENTIAL
// =============================================================================

/// Seeded 3-D OpenSimplex noise.
///
/// # Example
///
/// ```rust
/// use flow_field::{ScalarPotential, SimplexPotential};
/// use glam::DVec3;
///
/// let a = SimplexPotential::new(3);
/// let b = SimplexPotential::new(3);
/// let p = DVec3::new(0.3, -1.2, 4.5);
/// assert_eq!(a.potential(p), b.potential(p));
/// ```
pub struct SimplexPotential {
    seed: u32,
    simplex: OpenSimplex,
}

impl SimplexPotential {
    /// Creates a potential from a seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: OpenSimplex::new(seed),
        }
    }

}

impl Clone for SimplexPotential {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl fmt::Debug for SimplexPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexPotential")
            .field("seed", &self.seed)
            .finish()
    }
}

impl ScalarPotential for SimplexPotential {
    #[inline]
    fn potential(&self, position: DVec3) -> f64 {
        self.simplex.get([position.x, position.y, position.z])
    }
}

// =============================================================================
// CURL NOISE FIELD
// =============================================================================

/// Curl of three offset channels of a scalar potential.
///
/// # Example
///
/// ```rust
/// use flow_field::{FlowField, NoiseField};
/// use glam::DVec3;
///
/// let field = NoiseField::new(11);
/// let p = DVec3::new(0.25, 0.5, 0.75);
/// assert_eq!(field.curl(p), field.velocity(p));
/// ```
#[derive(Debug, Clone)]
pub struct NoiseField<P = SimplexPotential> {
    potential: P,
    epsilon: f64,
    offsets: [DVec3; 3],
}

impl NoiseField<SimplexPotential> {
    /// Creates a curl-noise field over seeded simplex noise.
    pub fn new(seed: u32) -> Self {
        Self::with_potential(SimplexPotential::new(seed))
    }
}

impl<P: ScalarPotential> NoiseField<P> {
    /// Creates a curl field over an arbitrary potential.
    pub fn with_potential(potential: P) -> Self {
        Self {
            potential,
            epsilon: CURL_EPSILON,
            offsets: POTENTIAL_CHANNEL_OFFSETS.map(DVec3::from_array),
        }
    }

    /// Overrides the finite-difference step.
    ///
    /// Non-positive or non-finite values keep the current step.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        if epsilon > 0.0 && epsilon.is_finite() {
            self.epsilon = epsilon;
        }
        self
    }

    /// Samples the underlying scalar potential.
    #[inline]
    pub fn potential(&self, position: DVec3) -> f64 {
        self.potential.potential(position)
    }

    /// Samples potential channel `channel` (0 = Nx, 1 = Ny, 2 = Nz).
    #[inline]
    fn channel(&self, channel: usize, position: DVec3) -> f64 {
        self.potential.potential(position + self.offsets[channel])
    }

    /// Central-difference estimate of `∂N_channel/∂axis`.
    #[inline]
    fn partial(&self, channel: usize, position: DVec3, axis: DVec3) -> f64 {
        let step = axis * self.epsilon;
        (self.channel(channel, position + step) - self.channel(channel, position - step))
            / (2.0 * self.epsilon)
    }

    /// Evaluates the curl at a position in noise space.
    pub fn curl(&self, position: DVec3) -> DVec3 {
        let dnz_dy = self.partial(2, position, DVec3::Y);
        let dny_dz = self.partial(1, position, DVec3::Z);
        let dnx_dz = self.partial(0, position, DVec3::Z);
        let dnz_dx = self.partial(2, position, DVec3::X);
        let dny_dx = self.partial(1, position, DVec3::X);
        let dnx_dy = self.partial(0, position, DVec3::Y);

        DVec3::new(dnz_dy - dny_dz, dnx_dz - dnz_dx, dny_dx - dnx_dy)
    }
}

impl<P: ScalarPotential> FlowField for NoiseField<P> {
    #[inline]
    fn velocity(&self, position: DVec3) -> DVec3 {
        self.curl(position)
    }
}

// =============================================================================
// UNIFORM FLOW
// =============================================================================

/// A constant vector field.
///
/// Streamlines through it are straight lines; a zero vector stalls every
/// seed in place.
///
/// # Example
///
/// ```rust
/// use flow_field::{FlowField, UniformFlow};
/// use glam::DVec3;
///
/// let field = UniformFlow(DVec3::Y);
/// assert_eq!(field.velocity(DVec3::new(5.0, 6.0, 7.0)), DVec3::Y);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformFlow(pub DVec3);

impl FlowField for UniformFlow {
    #[inline]
    fn velocity(&self, _position: DVec3) -> DVec3 {
        self.0
    }
}

#[cfg(test)]
mod tests;
