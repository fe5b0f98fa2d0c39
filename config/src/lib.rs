//! # Config Crate
//!
//! Centralized configuration constants for the flow-tube geometry pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CURL_EPSILON, DEFAULT_RADIAL_SEGMENTS, MIN_RADIAL_SEGMENTS};
//!
//! // Finite-difference step used by the curl operator
//! assert!(CURL_EPSILON > 0.0);
//!
//! // Cross-section resolution defaults
//! let requested = 0;
//! let segments = if requested >= MIN_RADIAL_SEGMENTS { requested } else { DEFAULT_RADIAL_SEGMENTS };
//! assert_eq!(segments, DEFAULT_RADIAL_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **Deterministic**: Seeds and channel offsets are fixed so batches reproduce
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
