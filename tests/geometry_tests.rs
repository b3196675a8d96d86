// Host-side tests for procedural geometry and motion profiles.

#![allow(dead_code)]
mod core {
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod motion {
        include!("../src/core/motion.rs");
    }
}

use crate::core::geometry::*;
use crate::core::motion::*;
use glam::Vec3;

#[test]
fn every_shape_is_a_valid_triangle_list() {
    for shape in Shape::ALL {
        let m = shape.mesh();
        assert!(!m.vertices.is_empty(), "{shape:?}");
        assert_eq!(m.indices.len() % 3, 0, "{shape:?}");
        let n = m.vertices.len() as u32;
        assert!(m.indices.iter().all(|&i| i < n), "{shape:?} index out of range");
        for v in &m.vertices {
            let len = Vec3::from(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "{shape:?} normal length {len}");
        }
    }
}

#[test]
fn bounding_radius_encloses_mesh() {
    for shape in Shape::ALL {
        let r = shape.mesh().max_radius();
        assert!(r <= shape.bounding_radius() + 1e-3, "{shape:?}: {r}");
        // and is not wildly loose
        assert!(r >= shape.bounding_radius() * 0.8, "{shape:?}: {r}");
    }
}

#[test]
fn shape_index_matches_all_order() {
    for (i, shape) in Shape::ALL.iter().enumerate() {
        assert_eq!(shape.index(), i);
    }
}

#[test]
fn torus_lies_in_xy_plane_with_open_hole() {
    let m = torus(10.0, 3.0, 16, 100);
    assert_eq!(m.vertices.len(), 17 * 101);
    assert_eq!(m.indices.len(), 16 * 100 * 6);
    for v in &m.vertices {
        let p = Vec3::from(v.position);
        assert!(p.z.abs() <= 3.0 + 1e-4);
        let radial = p.truncate().length();
        assert!((7.0 - 1e-3..=13.0 + 1e-3).contains(&radial));
    }
}

#[test]
fn polyhedra_sit_on_their_sphere() {
    for (m, r) in [
        (octahedron(2.2), 2.2),
        (icosahedron(4.0, 1), 4.0),
        (dodecahedron(2.6), 2.6),
    ] {
        for v in &m.vertices {
            assert!((Vec3::from(v.position).length() - r).abs() < 1e-4);
        }
    }
}

#[test]
fn polyhedron_normals_face_outward() {
    let m = icosahedron(4.0, 1);
    assert_eq!(m.indices.len() / 3, 20 * 4);
    for tri in m.indices.chunks_exact(3) {
        let a = Vec3::from(m.vertices[tri[0] as usize].position);
        let b = Vec3::from(m.vertices[tri[1] as usize].position);
        let c = Vec3::from(m.vertices[tri[2] as usize].position);
        let n = Vec3::from(m.vertices[tri[0] as usize].normal);
        assert!(n.dot(a + b + c) > 0.0);
        // winding agrees with the stored normal
        assert!((b - a).cross(c - a).dot(n) > 0.0);
    }
}

#[test]
fn edges_are_deduplicated() {
    // 12 edges, two indices each
    assert_eq!(octahedron(1.0).edges().len(), 24);
    assert_eq!(icosahedron(1.0, 0).edges().len(), 60);
    let torus_edges = torus(10.0, 3.0, 4, 8).edges();
    assert_eq!(torus_edges.len() % 2, 0);
    assert!(!torus_edges.is_empty());
}

#[test]
fn oscillation_offsets_only_their_axis() {
    let o = Oscillation::new(Channel::Position, Axis::Y, 2.0, 0.5);
    let off = o.offset(1.0);
    assert_eq!(off.x, 0.0);
    assert_eq!(off.z, 0.0);
    assert!((off.y - 2.0 * 0.5f32.sin()).abs() < 1e-6);

    let c = Oscillation::new(Channel::Scale, Axis::All, 0.1, 1.0).phased(0.5, Wave::Cos);
    let off = c.offset(0.0);
    assert!((off - Vec3::splat(0.1 * 0.5f32.cos())).abs().max_element() < 1e-6);
}

#[test]
fn profile_sums_channel_offsets() {
    let p = MotionProfile::spinning(Vec3::new(0.0, 0.01, 0.0))
        .with(Oscillation::new(Channel::Position, Axis::X, 1.0, 1.0))
        .with(Oscillation::new(Channel::Position, Axis::X, 0.5, 2.0));
    assert!(p.drives(Channel::Position));
    assert!(!p.drives(Channel::Scale));
    let off = p.channel_offset(Channel::Position, 0.3);
    let expected = 0.3f32.sin() + 0.5 * 0.6f32.sin();
    assert!((off.x - expected).abs() < 1e-6);
    assert_eq!(p.channel_offset(Channel::Scale, 0.3), Vec3::ZERO);
}

#[test]
fn spin_override_needs_opt_in() {
    let spin = Vec3::new(0.0, 0.01, 0.0);
    let kick = Some(Vec3::splat(0.02));
    let fixed = MotionProfile::spinning(spin);
    assert_eq!(fixed.effective_spin(kick), spin);
    let open = MotionProfile::spinning(spin).overridable();
    assert_eq!(open.effective_spin(kick), Vec3::splat(0.02));
    assert_eq!(open.effective_spin(None), spin);
}

#[test]
fn light_pulse_never_goes_negative() {
    let pulse = LightPulse {
        amplitude: 2.0,
        frequency: 1.0,
        phase: 0.0,
        wave: Wave::Sin,
    };
    assert_eq!(pulse.intensity(0.5, std::f32::consts::FRAC_PI_2 * 3.0), 0.0);
    assert!((pulse.intensity(0.5, std::f32::consts::FRAC_PI_2) - 2.5).abs() < 1e-5);
}
