//! Streamline integration tests.

use super::*;
use crate::field::{NoiseField, UniformFlow};
use approx::assert_relative_eq;

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

/// Field whose velocity vanishes on the plane x = 0.
struct LinearSink;

impl FlowField for LinearSink {
    fn velocity(&self, position: DVec3) -> DVec3 {
        DVec3::new(-position.x, 0.0, 0.0)
    }
}

#[test]
fn test_constant_field_produces_colinear_points() {
    let line = integrate(&UniformFlow(DVec3::Y), DVec3::ZERO, &scenario());

    assert_eq!(line.len(), 5);
    for (i, p) in line.points().iter().enumerate() {
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
        assert_relative_eq!(p.y, 0.1 * i as f64, epsilon = 1e-12);
    }
    for pair in line.points().windows(2) {
        assert_relative_eq!(pair[0].distance(pair[1]), 0.1, epsilon = 1e-12);
    }
}

#[test]
fn test_point_count_matches_steps() {
    let field = NoiseField::new(3);
    for steps in [1, 2, 7, 50] {
        let params = GenerationParameters {
            steps_per_streamline: steps,
            ..scenario()
        };
        let line = integrate(&field, DVec3::new(0.1, 0.2, 0.3), &params);
        assert_eq!(line.len(), steps as usize + 1);
    }
}

#[test]
fn test_first_point_is_seed() {
    let seed = DVec3::new(-0.4, 0.8, 1.6);
    let line = integrate(&NoiseField::new(1), seed, &scenario());
    assert_eq!(line.points()[0], seed);
}

#[test]
fn test_integration_is_deterministic() {
    let field = NoiseField::new(21);
    let params = GenerationParameters {
        steps_per_streamline: 64,
        step_length: 0.02,
        ..scenario()
    };
    let seed = DVec3::new(0.3, -0.1, 0.7);
    assert_eq!(integrate(&field, seed, &params), integrate(&field, seed, &params));
}

#[test]
fn test_zero_field_stalls_in_place() {
    let seed = DVec3::new(1.0, 2.0, 3.0);
    let line = integrate(&UniformFlow(DVec3::ZERO), seed, &scenario());
    assert_eq!(line.len(), 5);
    assert!(line.points().iter().all(|p| *p == seed));
    assert_eq!(line.polyline_length(), 0.0);
}

#[test]
fn test_fixed_point_stalls_for_remaining_steps() {
    // Seed on the zero plane never moves
    let line = integrate(&LinearSink, DVec3::new(0.0, 5.0, 0.0), &scenario());
    assert!(line.points().iter().all(|p| *p == DVec3::new(0.0, 5.0, 0.0)));
}

#[test]
fn test_noise_scale_rescales_sample_position() {
    // Velocity is sampled at point / noiseScale
    let params = GenerationParameters {
        steps_per_streamline: 1,
        step_length: 1.0,
        noise_scale: 2.0,
        ..scenario()
    };
    let line = integrate(&LinearSink, DVec3::new(4.0, 0.0, 0.0), &params);
    // velocity(4 / 2) = -2
    assert_eq!(line.points()[1], DVec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_curl_streamline_moves() {
    let params = GenerationParameters {
        steps_per_streamline: 32,
        step_length: 0.05,
        ..scenario()
    };
    let line = integrate(&NoiseField::new(5), DVec3::new(0.2, 0.4, 0.6), &params);
    assert!(line.polyline_length() > 0.0);
    assert!(line.points().iter().all(|p| p.is_finite()));
}
