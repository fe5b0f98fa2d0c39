use super::*;
use approx::assert_relative_eq;
use flow_field::{integrate, GenerationParameters, UniformFlow};

fn vertical_curve() -> Curve {
    // Four anchors, 0.1 apart along +Y
    let params = GenerationParameters {
        steps_per_streamline: 4,
        step_length: 0.1,
        ..GenerationParameters::default()
    };
    let line = integrate(&UniformFlow(DVec3::Y), DVec3::ZERO, &params);
    Curve::fit(&line, false)
}

fn helix(closed: bool) -> Curve {
    let points: Vec<DVec3> = (0..32)
        .map(|i| {
            let a = TAU * i as f64 / 32.0;
            DVec3::new(a.cos(), a.sin(), 0.3 * (3.0 * a).cos())
        })
        .collect();
    Curve::through(&points, closed)
}

#[test]
fn test_open_tube_counts() {
    let tube = build_tube(&vertical_curve(), 0.01, 8, 10, false).unwrap();
    assert_eq!(tube.vertex_count(), 88);
    assert_eq!(tube.index_count(), 480);
    assert_eq!(tube.ring_count(), 11);
    assert_eq!(
        tube.layout(),
        RingLayout {
            radial_segments: 8,
            closed: false
        }
    );
    assert!(tube.buffers().validate());
}

#[test]
fn test_closed_tube_counts() {
    let tube = build_tube(&helix(true), 0.05, 6, 12, true).unwrap();
    assert_eq!(tube.vertex_count(), 6 * 13);
    assert_eq!(tube.index_count(), 6 * 13 * 6);
    assert!(tube.buffers().validate());

    // The closing band joins the last ring to the first
    let last_band = &tube.buffers().triangles()[tube.buffers().triangle_count() - 2..];
    assert!(last_band.iter().any(|tri| tri.contains(&0)));
}

#[test]
fn test_rings_sit_at_tube_radius() {
    let radius = 0.01;
    let tube = build_tube(&vertical_curve(), radius, 8, 10, false).unwrap();
    let buffers = tube.buffers();
    for ring in 0..11 {
        let center = DVec3::new(0.0, 0.4 * ring as f64 / 10.0, 0.0);
        for j in 0..8 {
            let p = buffers.positions()[ring * 8 + j];
            assert_relative_eq!(p.y, center.y, epsilon = 1e-9);
            assert_relative_eq!(p.distance(center), radius, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_normals_point_outward() {
    let curve = helix(false);
    let tube = build_tube(&curve, 0.02, 7, 40, false).unwrap();
    let buffers = tube.buffers();
    for i in 0..=40 {
        let frame = curve.frame(i as f64 / 40.0);
        for j in 0..7 {
            let index = i * 7 + j;
            let normal = buffers.normals()[index];
            let offset = buffers.positions()[index] - frame.position;
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(normal.dot(frame.tangent), 0.0, epsilon = 1e-9);
            assert_relative_eq!(offset.distance(normal * 0.02), 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_triangles_face_outward() {
    let tube = build_tube(&vertical_curve(), 0.05, 8, 10, false).unwrap();
    let buffers = tube.buffers();
    for tri in buffers.triangles() {
        let [a, b, c] = tri.map(|i| buffers.positions()[i as usize]);
        let face = (b - a).cross(c - a);
        let normal = buffers.normals()[tri[0] as usize]
            + buffers.normals()[tri[1] as usize]
            + buffers.normals()[tri[2] as usize];
        assert!(face.dot(normal) > 0.0);
    }
}

#[test]
fn test_uv_ranges() {
    let tube = build_tube(&vertical_curve(), 0.01, 8, 10, false).unwrap();
    let uvs = tube.buffers().uvs();
    assert_eq!(uvs[0], DVec2::ZERO);
    assert_relative_eq!(uvs[87].x, 1.0);
    assert_relative_eq!(uvs[87].y, 7.0 / 8.0);
    assert!(uvs.iter().all(|uv| (0.0..=1.0).contains(&uv.x) && uv.y < 1.0));
}

#[test]
fn test_closed_uv_matches_ring_spacing() {
    let tube = build_tube(&helix(true), 0.05, 6, 12, true).unwrap();
    let uvs = tube.buffers().uvs();
    for ring in 0..13 {
        let u = uvs[ring * 6].x;
        assert_relative_eq!(u, ring as f64 / 13.0, epsilon = 1e-12);
    }
    // The closing band spans the same u step as every other band
    let last_step = 1.0 - uvs[12 * 6].x;
    assert_relative_eq!(last_step, uvs[6].x - uvs[0].x, epsilon = 1e-12);
}

#[test]
fn test_stalled_curve_collapses_to_ring() {
    let line = flow_field::Streamline::from_points(vec![DVec3::ONE; 5]);
    let curve = Curve::fit(&line, false);
    let tube = build_tube(&curve, 0.1, 6, 8, false).unwrap();
    assert_eq!(tube.vertex_count(), 54);
    assert!(tube.buffers().validate());
    assert!(tube
        .buffers()
        .positions()
        .iter()
        .all(|p| p.is_finite() && (p.distance(DVec3::ONE) - 0.1).abs() < 1e-9));
}

#[test]
fn test_invalid_arguments() {
    let curve = vertical_curve();

    let err = build_tube(&curve, 0.01, 2, 10, false).unwrap_err();
    assert_eq!(
        err,
        MeshError::Field(FieldError::invalid_parameter(
            "radialSegments",
            "must be at least 3, got 2"
        ))
    );

    let err = build_tube(&curve, 0.01, 8, 0, false).unwrap_err();
    assert!(matches!(
        err,
        MeshError::Field(FieldError::InvalidParameter {
            name: "tubularSegments",
            ..
        })
    ));

    for radius in [0.0, -1.0, f64::NAN] {
        let err = build_tube(&curve, radius, 8, 10, false).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Field(FieldError::InvalidParameter {
                name: "tubeRadius",
                ..
            })
        ));
    }
}
