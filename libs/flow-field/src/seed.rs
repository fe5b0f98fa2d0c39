//! # Seed Layouts
//!
//! Deterministic placement of streamline seed points. Every layout is a pure
//! function of `(index, count)`, so a batch reproduces exactly no matter
//! which worker integrates which streamline.

use config::constants::{DEFAULT_NOISE_SEED, DEFAULT_SEED_EXTENT};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// How seed points are distributed.
///
/// # Example
///
/// ```rust
/// use flow_field::SeedLayout;
/// use glam::DVec3;
///
/// let layout = SeedLayout::Line {
///     start: DVec3::new(-1.0, 0.0, 0.0),
///     end: DVec3::new(1.0, 0.0, 0.0),
/// };
/// assert_eq!(layout.position(0, 3), DVec3::new(-1.0, 0.0, 0.0));
/// assert_eq!(layout.position(1, 3), DVec3::ZERO);
/// assert_eq!(layout.position(2, 3), DVec3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SeedLayout {
    /// Evenly spaced from `start` to `end`, both inclusive.
    Line { start: DVec3, end: DVec3 },
    /// Evenly spaced on a circle in the XY plane.
    Circle { center: DVec3, radius: f64 },
    /// Hashed uniform scatter inside the cube `[-half_extent, half_extent]³`.
    #[serde(rename_all = "camelCase")]
    Scatter { half_extent: f64, seed: u64 },
}

impl Default for SeedLayout {
    fn default() -> Self {
        Self::Scatter {
            half_extent: DEFAULT_SEED_EXTENT,
            seed: u64::from(DEFAULT_NOISE_SEED),
        }
    }
}

impl SeedLayout {
    /// Returns the seed point of streamline `index` out of `count`.
    pub fn position(&self, index: u32, count: u32) -> DVec3 {
        match *self {
            Self::Line { start, end } => {
                let t = if count <= 1 {
                    0.5
                } else {
                    f64::from(index) / f64::from(count - 1)
                };
                start.lerp(end, t)
            }
            Self::Circle { center, radius } => {
                let theta = TAU * f64::from(index) / f64::from(count.max(1));
                center + DVec3::new(theta.cos(), theta.sin(), 0.0) * radius
            }
            Self::Scatter { half_extent, seed } => {
                let key = u64::from(index);
                DVec3::new(
                    hash_signed_unit(seed, key, 0),
                    hash_signed_unit(seed, key, 1),
                    hash_signed_unit(seed, key, 2),
                ) * half_extent
            }
        }
    }

    /// Returns all `count` seed points in index order.
    pub fn positions(&self, count: u32) -> Vec<DVec3> {
        (0..count).map(|index| self.position(index, count)).collect()
    }
}

/// SplitMix64 finalizer.
#[inline]
fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Maps `(seed, index, lane)` to a value in `[-1, 1)`.
fn hash_signed_unit(seed: u64, index: u64, lane: u64) -> f64 {
    let golden = 0x9e37_79b9_7f4a_7c15_u64;
    let h = mix64(
        seed.wrapping_add(golden)
            ^ mix64(index.wrapping_mul(golden).wrapping_add(lane)),
    );
    // Top 53 bits → [0, 1)
    let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
    unit * 2.0 - 1.0
}
