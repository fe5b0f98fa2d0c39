//! # Flow Mesh
//!
//! Turns streamlines into tube geometry.
//! Converts [`flow_field::Streamline`]s into one merged triangle batch.
//!
//! ## Architecture
//!
//! ```text
//! Streamline → Curve (Catmull-Rom + parallel transport)
//!            → TubeMesh (rings + quads) → merge → MergedMesh
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use flow_field::Streamline;
//! use flow_mesh::{build_tube, merge, Curve};
//! use glam::DVec3;
//!
//! let line = Streamline::from_points(vec![DVec3::ZERO, DVec3::Y, DVec3::new(1.0, 2.0, 0.0)]);
//! let curve = Curve::fit(&line, false);
//! let tube = build_tube(&curve, 0.05, 6, 12, false).unwrap();
//! assert_eq!(tube.vertex_count(), 6 * 13);
//!
//! let batch = merge(vec![tube.clone(), tube]).unwrap();
//! assert_eq!(batch.vertex_count(), 2 * 6 * 13);
//! ```

pub mod curve;
pub mod error;
pub mod merge;
pub mod mesh;
pub mod tube;

pub use curve::{Curve, Frame};
pub use error::{MeshError, MeshResult};
pub use merge::{merge, MergedMesh};
pub use mesh::{MeshBuffers, RingLayout};
pub use tube::{build_tube, TubeMesh};
