//! # Flow Pipeline
//!
//! Generation passes and their lifecycle: parameters in, one published
//! [`flow_mesh::MergedMesh`] out.
//!
//! ## Architecture
//!
//! ```text
//! request_regeneration(params)
//!   → validate (synchronous)
//!   → generate_batch: seed → integrate → Curve → build_tube   (per index, parallel)
//!   → merge (index order)
//!   → publish (Arc swap, previous batch released)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use flow_field::{GenerationParameters, NoiseField, SeedLayout};
//! use flow_pipeline::RegenerationManager;
//!
//! let manager = RegenerationManager::inline(NoiseField::new(1337), SeedLayout::default());
//! let params = GenerationParameters {
//!     streamline_count: 10,
//!     ..GenerationParameters::default()
//! };
//! manager.request_regeneration(params).unwrap();
//!
//! let mesh = manager.current_mesh().unwrap();
//! assert_eq!(mesh.vertex_count() as u64, params.total_vertices());
//! ```

pub mod batch;
pub mod clock;
pub mod error;
pub mod manager;

pub use batch::{build_tube_for, generate_batch, generate_cancellable};
pub use clock::{FrameClock, FrameUniforms};
pub use error::{PipelineError, PipelineResult};
pub use manager::{ManagerState, RegenerationManager};
