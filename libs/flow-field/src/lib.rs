//! # Flow Field
//!
//! Deterministic curl-noise vector field and the streamline integrator that
//! advances seed points through it.
//!
//! ## Architecture
//!
//! ```text
//! GenerationParameters → SeedLayout (seed points)
//!                      → integrate (NoiseField curl) → Streamline → flow-mesh
//! ```
//!
//! ## Example
//!
//! ```rust
//! use flow_field::{integrate, GenerationParameters, NoiseField};
//! use glam::DVec3;
//!
//! let field = NoiseField::new(7);
//! let params = GenerationParameters::default();
//! params.validate().unwrap();
//!
//! let streamline = integrate(&field, DVec3::ZERO, &params);
//! assert_eq!(streamline.len(), params.steps_per_streamline as usize + 1);
//! ```

pub mod error;
pub mod field;
pub mod params;
pub mod seed;
pub mod streamline;

// Re-export public API
pub use error::{FieldError, FieldResult};
pub use field::{FlowField, NoiseField, ScalarPotential, SimplexPotential, UniformFlow};
pub use params::GenerationParameters;
pub use seed::SeedLayout;
pub use streamline::{integrate, Streamline};
