//! # Generation Parameters
//!
//! The numeric inputs that, together with a fixed noise source, fully
//! determine a generated batch. Validation happens once, at the boundary,
//! before any point is integrated.

use config::constants::{
    DEFAULT_NOISE_SCALE, DEFAULT_RADIAL_SEGMENTS, DEFAULT_STEPS_PER_STREAMLINE,
    DEFAULT_STEP_LENGTH, DEFAULT_STREAMLINE_COUNT, DEFAULT_TUBE_RADIUS, DEFAULT_TUBULAR_SEGMENTS,
    MAX_VERTICES, MIN_RADIAL_SEGMENTS, MIN_STEPS_PER_STREAMLINE, MIN_STREAMLINE_COUNT,
    MIN_TUBULAR_SEGMENTS,
};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldResult};

/// Parameters of one generation pass.
///
/// Field names serialize in camelCase so UI collaborators can send JSON.
///
/// # Example
///
/// ```rust
/// use flow_field::GenerationParameters;
///
/// let params = GenerationParameters {
///     streamline_count: 1,
///     steps_per_streamline: 4,
///     step_length: 0.1,
///     noise_scale: 1.0,
///     tube_radius: 0.01,
///     radial_segments: 8,
///     tubular_segments: 10,
///     closed_cross_section: false,
/// };
/// assert!(params.validate().is_ok());
/// assert_eq!(params.vertices_per_tube(), 88);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationParameters {
    /// Number of streamlines, one tube each.
    pub streamline_count: u32,
    /// Euler steps per streamline; a streamline holds one more point.
    pub steps_per_streamline: u32,
    /// Euler step length in world units.
    pub step_length: f64,
    /// Spatial scale of the swirl pattern.
    pub noise_scale: f64,
    /// Tube radius in world units.
    pub tube_radius: f64,
    /// Vertices per tube ring.
    pub radial_segments: u32,
    /// Segments along each tube; a tube holds one more ring.
    pub tubular_segments: u32,
    /// Connect the last ring of each tube back to the first.
    pub closed_cross_section: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            streamline_count: DEFAULT_STREAMLINE_COUNT,
            steps_per_streamline: DEFAULT_STEPS_PER_STREAMLINE,
            step_length: DEFAULT_STEP_LENGTH,
            noise_scale: DEFAULT_NOISE_SCALE,
            tube_radius: DEFAULT_TUBE_RADIUS,
            radial_segments: DEFAULT_RADIAL_SEGMENTS,
            tubular_segments: DEFAULT_TUBULAR_SEGMENTS,
            closed_cross_section: false,
        }
    }
}

impl GenerationParameters {
    /// Checks every field against its constraint.
    ///
    /// Fails fast on the first violation, in the order: radial segments,
    /// tubular segments, steps, streamline count, tube radius, step length,
    /// noise scale, then the batch vertex budget.
    pub fn validate(&self) -> FieldResult<()> {
        check_min("radialSegments", self.radial_segments, MIN_RADIAL_SEGMENTS)?;
        check_min("tubularSegments", self.tubular_segments, MIN_TUBULAR_SEGMENTS)?;
        check_min(
            "stepsPerStreamline",
            self.steps_per_streamline,
            MIN_STEPS_PER_STREAMLINE,
        )?;
        check_min("streamlineCount", self.streamline_count, MIN_STREAMLINE_COUNT)?;
        check_positive("tubeRadius", self.tube_radius)?;
        check_positive("stepLength", self.step_length)?;
        check_positive("noiseScale", self.noise_scale)?;

        let count = self.total_vertices();
        if count > MAX_VERTICES as u64 {
            return Err(FieldError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }

        Ok(())
    }

    /// Vertex count of a single tube: one ring per sampled curve point.
    pub fn vertices_per_tube(&self) -> u64 {
        u64::from(self.radial_segments) * (u64::from(self.tubular_segments) + 1)
    }

    /// Index count of a single tube, including the closing band when closed.
    pub fn indices_per_tube(&self) -> u64 {
        let bands = u64::from(self.tubular_segments) + u64::from(self.closed_cross_section);
        u64::from(self.radial_segments) * bands * 6
    }

    /// Vertex count of the merged batch.
    pub fn total_vertices(&self) -> u64 {
        u64::from(self.streamline_count) * self.vertices_per_tube()
    }
}

fn check_min(name: &'static str, value: u32, min: u32) -> FieldResult<()> {
    if value < min {
        return Err(FieldError::invalid_parameter(
            name,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> FieldResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FieldError::invalid_parameter(
            name,
            format!("must be a positive finite number, got {}", value),
        ));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> GenerationParameters {
        GenerationParameters {
            streamline_count: 1,
            steps_per_streamline: 4,
            step_length: 0.1,
            noise_scale: 1.0,
            tube_radius: 0.01,
            radial_segments: 8,
            tubular_segments: 10,
            closed_cross_section: false,
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(GenerationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_scenario_is_valid() {
        assert!(scenario().validate().is_ok());
    }

    #[test]
    fn test_two_radial_segments_rejected() {
        let params = GenerationParameters {
            radial_segments: 2,
            ..scenario()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.parameter_name(), Some("radialSegments"));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let params = GenerationParameters {
            steps_per_streamline: 0,
            ..scenario()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.parameter_name(), Some("stepsPerStreamline"));
    }

    #[test]
    fn test_zero_counts_rejected() {
        let params = GenerationParameters {
            tubular_segments: 0,
            ..scenario()
        };
        assert_eq!(
            params.validate().unwrap_err().parameter_name(),
            Some("tubularSegments")
        );

        let params = GenerationParameters {
            streamline_count: 0,
            ..scenario()
        };
        assert_eq!(
            params.validate().unwrap_err().parameter_name(),
            Some("streamlineCount")
        );
    }

    #[test]
    fn test_non_positive_lengths_rejected() {
        for (params, name) in [
            (GenerationParameters { tube_radius: 0.0, ..scenario() }, "tubeRadius"),
            (GenerationParameters { step_length: -0.1, ..scenario() }, "stepLength"),
            (GenerationParameters { noise_scale: 0.0, ..scenario() }, "noiseScale"),
            (GenerationParameters { noise_scale: f64::NAN, ..scenario() }, "noiseScale"),
            (GenerationParameters { tube_radius: f64::INFINITY, ..scenario() }, "tubeRadius"),
        ] {
            assert_eq!(params.validate().unwrap_err().parameter_name(), Some(name));
        }
    }

    #[test]
    fn test_first_violation_reported() {
        let params = GenerationParameters {
            radial_segments: 1,
            tube_radius: -1.0,
            ..scenario()
        };
        assert_eq!(
            params.validate().unwrap_err().parameter_name(),
            Some("radialSegments")
        );
    }

    #[test]
    fn test_vertex_budget_enforced() {
        let params = GenerationParameters {
            streamline_count: 100_000,
            radial_segments: 64,
            tubular_segments: 512,
            ..scenario()
        };
        assert!(matches!(
            params.validate(),
            Err(FieldError::TooManyVertices { .. })
        ));
    }

    #[test]
    fn test_sizing_helpers() {
        let params = scenario();
        assert_eq!(params.vertices_per_tube(), 88);
        assert_eq!(params.indices_per_tube(), 8 * 10 * 6);
        assert_eq!(params.total_vertices(), 88);

        let closed = GenerationParameters {
            closed_cross_section: true,
            ..params
        };
        assert_eq!(closed.indices_per_tube(), 8 * 11 * 6);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&scenario()).unwrap();
        assert!(json.contains("\"radialSegments\":8"));
        assert!(json.contains("\"closedCrossSection\":false"));

        let parsed: GenerationParameters =
            serde_json::from_str(r#"{"streamlineCount": 3, "radialSegments": 5}"#).unwrap();
        assert_eq!(parsed.streamline_count, 3);
        assert_eq!(parsed.radial_segments, 5);
        assert_eq!(parsed.tubular_segments, DEFAULT_TUBULAR_SEGMENTS);
    }
}
