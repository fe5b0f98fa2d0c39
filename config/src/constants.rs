//! # Configuration Constants
//!
//! Centralized constants for the flow-tube pipeline. Noise sampling, curve
//! fitting resolution, parameter defaults, and safety limits are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Noise**: Curl finite-difference step, seeds, potential channel offsets
//! - **Parameters**: Defaults and lower bounds for generation parameters
//! - **Curve**: Spline and arc-length table resolution
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance, e.g. whether a curve has any length at all.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Minimum squared length a direction must have before it is normalized.
///
/// Directions shorter than this are treated as undefined and replaced by a
/// fallback (previous tangent, chord direction, or a fixed axis).
pub const DIRECTION_EPSILON: f64 = 1e-20;

// =============================================================================
// NOISE CONSTANTS
// =============================================================================

/// Finite-difference step for the curl operator.
///
/// Each partial derivative is estimated by a central difference of width
/// `2 * CURL_EPSILON`. The step is applied in noise space, after the sample
/// position has been divided by the noise scale, so it is independent of
/// the `noiseScale` parameter.
///
/// # Example
///
/// ```rust
/// use config::constants::CURL_EPSILON;
///
/// let f = |x: f64| x * x;
/// let derivative = (f(1.0 + CURL_EPSILON) - f(1.0 - CURL_EPSILON)) / (2.0 * CURL_EPSILON);
/// assert!((derivative - 2.0).abs() < 1e-6);
/// ```
pub const CURL_EPSILON: f64 = 1e-4;

/// Default seed of the scalar noise source.
pub const DEFAULT_NOISE_SEED: u32 = 1337;

/// Offsets that decorrelate the three potential channels `Nx`, `Ny`, `Nz`.
///
/// Every channel samples the same scalar noise, shifted by one of these
/// offsets. The values are large and non-integral so the shifted lattices
/// do not line up.
///
/// # Example
///
/// ```rust
/// use config::constants::POTENTIAL_CHANNEL_OFFSETS;
///
/// assert_ne!(POTENTIAL_CHANNEL_OFFSETS[0], POTENTIAL_CHANNEL_OFFSETS[1]);
/// assert_ne!(POTENTIAL_CHANNEL_OFFSETS[1], POTENTIAL_CHANNEL_OFFSETS[2]);
/// ```
pub const POTENTIAL_CHANNEL_OFFSETS: [[f64; 3]; 3] = [
    [0.0, 0.0, 0.0],
    [31.416, -47.853, 12.793],
    [-233.145, -113.408, 185.31],
];

// =============================================================================
// PARAMETER DEFAULTS
// =============================================================================

/// Default number of streamlines (one tube each) per batch.
pub const DEFAULT_STREAMLINE_COUNT: u32 = 1000;

/// Default number of integration steps per streamline.
pub const DEFAULT_STEPS_PER_STREAMLINE: u32 = 120;

/// Default Euler step length in world units.
pub const DEFAULT_STEP_LENGTH: f64 = 0.01;

/// Default noise scale. Larger values produce wider swirls.
pub const DEFAULT_NOISE_SCALE: f64 = 1.0;

/// Default tube radius in world units.
pub const DEFAULT_TUBE_RADIUS: f64 = 0.002;

/// Default number of vertices per tube ring.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_RADIAL_SEGMENTS, MIN_RADIAL_SEGMENTS};
/// assert!(DEFAULT_RADIAL_SEGMENTS >= MIN_RADIAL_SEGMENTS);
/// ```
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 6;

/// Default number of segments along each tube.
pub const DEFAULT_TUBULAR_SEGMENTS: u32 = 64;

/// Default half-extent of the region seeds are placed in.
pub const DEFAULT_SEED_EXTENT: f64 = 1.0;

// =============================================================================
// PARAMETER LOWER BOUNDS
// =============================================================================

/// Minimum streamline count of a batch.
pub const MIN_STREAMLINE_COUNT: u32 = 1;

/// Minimum integration steps; a single anchor point cannot define a tangent.
pub const MIN_STEPS_PER_STREAMLINE: u32 = 1;

/// Minimum ring vertex count; fewer than three vertices cannot enclose area.
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Minimum number of segments along a tube.
pub const MIN_TUBULAR_SEGMENTS: u32 = 1;

// =============================================================================
// CURVE CONSTANTS
// =============================================================================

/// Catmull-Rom knot exponent. `0.5` is the centripetal variant, which never
/// forms cusps or self-intersections within a span.
pub const CATMULL_ROM_ALPHA: f64 = 0.5;

/// Knot intervals shorter than this are replaced by `1.0`.
///
/// Stalled streamlines repeat the same anchor; without this the centripetal
/// knot spacing would divide by zero.
pub const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// Number of arc-length table samples per anchor span.
///
/// # Example
///
/// ```rust
/// use config::constants::ARC_LENGTH_DIVISIONS_PER_SPAN;
///
/// let anchors = 5;
/// let table_len = (anchors - 1) * ARC_LENGTH_DIVISIONS_PER_SPAN + 1;
/// assert!(table_len > anchors);
/// ```
pub const ARC_LENGTH_DIVISIONS_PER_SPAN: usize = 8;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in a merged batch.
///
/// Safety limit to prevent memory exhaustion and keep every index
/// representable as `u32`.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// assert!((MAX_VERTICES as u64) < u64::from(u32::MAX));
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
