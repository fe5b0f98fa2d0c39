//! Noise field tests.

use super::*;
use approx::assert_relative_eq;

/// Potential that is linear in x: `N(p) = p.x`.
struct LinearX;

impl ScalarPotential for LinearX {
    fn potential(&self, position: DVec3) -> f64 {
        position.x
    }
}

/// Potential `N(p) = x·y + z²`, with a nonzero curl that varies in space.
struct Quadratic;

impl ScalarPotential for Quadratic {
    fn potential(&self, position: DVec3) -> f64 {
        position.x * position.y + position.z * position.z
    }
}

fn divergence<F: FlowField>(field: &F, p: DVec3, h: f64) -> f64 {
    let dx = (field.velocity(p + DVec3::X * h).x - field.velocity(p - DVec3::X * h).x) / (2.0 * h);
    let dy = (field.velocity(p + DVec3::Y * h).y - field.velocity(p - DVec3::Y * h).y) / (2.0 * h);
    let dz = (field.velocity(p + DVec3::Z * h).z - field.velocity(p - DVec3::Z * h).z) / (2.0 * h);
    dx + dy + dz
}

#[test]
fn test_potential_is_deterministic() {
    let field = NoiseField::new(99);
    let p = DVec3::new(1.5, -0.25, 3.75);
    assert_eq!(field.potential(p), field.potential(p));
    assert_eq!(field.curl(p), NoiseField::new(99).curl(p));
}

#[test]
fn test_potential_is_bounded() {
    let potential = SimplexPotential::new(5);
    for i in 0..200 {
        let t = i as f64 * 0.173;
        let value = potential.potential(DVec3::new(t, t * 0.5, -t));
        assert!(value.is_finite());
        assert!((-1.5..=1.5).contains(&value));
    }
}

#[test]
fn test_seeds_produce_different_fields() {
    let a = NoiseField::new(1);
    let b = NoiseField::new(2);
    let differs = (0..16)
        .map(|i| DVec3::new(i as f64 * 0.31, 0.7, -0.2))
        .any(|p| a.curl(p) != b.curl(p));
    assert!(differs);
}

#[test]
fn test_channels_are_decorrelated() {
    let field = NoiseField::new(17);
    let p = DVec3::new(0.4, 0.9, -1.3);
    let nx = field.channel(0, p);
    let ny = field.channel(1, p);
    let nz = field.channel(2, p);
    assert!(nx != ny || ny != nz);
}

#[test]
fn test_curl_of_linear_potential() {
    // Every channel is x + const: ∂N/∂x = 1, all other partials vanish.
    // curl = (0 - 0, 0 - 1, 1 - 0)
    let field = NoiseField::with_potential(LinearX);
    let curl = field.curl(DVec3::new(3.0, -2.0, 1.0));
    assert_relative_eq!(curl.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(curl.y, -1.0, epsilon = 1e-6);
    assert_relative_eq!(curl.z, 1.0, epsilon = 1e-6);
}

#[test]
fn test_curl_axis_pairing_on_quadratic_potential() {
    // Channel c is N(p + o_c) with N = x·y + z².
    // ∂N/∂x = y + o.y, ∂N/∂y = x + o.x, ∂N/∂z = 2(z + o.z)
    let field = NoiseField::with_potential(Quadratic);
    let p = DVec3::new(0.5, -0.75, 0.25);
    let o = POTENTIAL_CHANNEL_OFFSETS.map(DVec3::from_array);

    let dnz_dy = p.x + o[2].x;
    let dny_dz = 2.0 * (p.z + o[1].z);
    let dnx_dz = 2.0 * (p.z + o[0].z);
    let dnz_dx = p.y + o[2].y;
    let dny_dx = p.y + o[1].y;
    let dnx_dy = p.x + o[0].x;

    let curl = field.curl(p);
    assert_relative_eq!(curl.x, dnz_dy - dny_dz, epsilon = 1e-5);
    assert_relative_eq!(curl.y, dnx_dz - dnz_dx, epsilon = 1e-5);
    assert_relative_eq!(curl.z, dny_dx - dnx_dy, epsilon = 1e-5);
}

#[test]
fn test_curl_noise_is_nearly_divergence_free() {
    let field = NoiseField::new(23);
    for i in 0..10 {
        let p = DVec3::new(0.37 * i as f64, 0.11 - 0.29 * i as f64, 1.3 + 0.07 * i as f64);
        let magnitude = field.curl(p).length();
        let div = divergence(&field, p, 1e-3);
        assert!(
            div.abs() < 1e-2 * (1.0 + magnitude),
            "divergence {} at {:?} (|curl| = {})",
            div,
            p,
            magnitude
        );
    }
}

#[test]
fn test_epsilon_override() {
    let field = NoiseField::new(1).with_epsilon(1e-3);
    assert_eq!(field.epsilon, 1e-3);

    let field = field.with_epsilon(-1.0).with_epsilon(f64::NAN);
    assert_eq!(field.epsilon, 1e-3);
}

#[test]
fn test_uniform_flow_is_constant() {
    let field = UniformFlow(DVec3::new(0.0, 1.0, 0.0));
    assert_eq!(field.velocity(DVec3::ZERO), DVec3::Y);
    assert_eq!(field.velocity(DVec3::splat(100.0)), DVec3::Y);
}

#[test]
fn test_simplex_potential_clone_matches() {
    let original = SimplexPotential::new(8);
    let cloned = original.clone();
    let p = DVec3::new(-0.6, 0.2, 2.4);
    assert_eq!(original.seed, cloned.seed);
    assert_eq!(original.potential(p), cloned.potential(p));
}

#[test]
fn test_field_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NoiseField>();
    assert_send_sync::<UniformFlow>();
}
