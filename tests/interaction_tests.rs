// Host-side tests for click picking, the pulse/flash tweens and how running
// tweens interact with the per-frame motion.

#![allow(dead_code)]
mod core {
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod interaction {
        include!("../src/core/interaction.rs");
    }
    pub mod motion {
        include!("../src/core/motion.rs");
    }
    pub mod picking {
        include!("../src/core/picking.rs");
    }
    pub mod reactive {
        include!("../src/core/reactive.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod tween {
        include!("../src/core/tween.rs");
    }
}

use crate::core::constants::*;
use crate::core::geometry::Shape;
use crate::core::interaction::handle_click;
use crate::core::picking::{pick, ray_from_ndc, ray_sphere, ray_triangle};
use crate::core::reactive::Pointer;
use crate::core::scene::{ObjectId, Scene};
use crate::core::tween::{ease_in_out_quad, Tween, TweenProperty, TweenTrack, Tweener};
use glam::{Vec3, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scene() -> Scene {
    Scene::build(1600.0, 900.0, &mut StdRng::seed_from_u64(11))
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(3)
}

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Pointer that lands on `shape`'s current center.
fn aim_at(scene: &Scene, shape: Shape) -> Pointer {
    let id = scene.find(shape).expect("shape in scene");
    let pos = scene.mesh(id).expect("mesh").transform.position;
    let clip = scene.camera.projection_matrix() * scene.camera.view_matrix() * pos.extend(1.0);
    let ndc = clip / clip.w;
    Pointer {
        x: ndc.x,
        y: -ndc.y,
    }
}

// Just off the optical axis: through the torus hole onto the sphere.
const CENTER: Pointer = Pointer { x: 0.01, y: 0.01 };

#[test]
fn ray_sphere_hits_front_surface() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0);
    assert!(approx(t.expect("hit"), 3.0, 1e-5));
    assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    // behind the origin
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
    // from inside, the exit point counts
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::ZERO, 2.0);
    assert!(approx(t.expect("inside"), 2.0, 1e-5));
}

#[test]
fn ray_triangle_is_double_sided() {
    let (a, b, c) = (
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let front = ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, a, b, c);
    let back = ray_triangle(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, a, b, c);
    assert!(approx(front.expect("front"), 5.0, 1e-5));
    assert!(approx(back.expect("back"), 5.0, 1e-5));
    assert!(ray_triangle(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, a, b, c).is_none());
}

#[test]
fn center_ray_points_down_the_view_axis() {
    let s = scene();
    let ray = ray_from_ndc(&s.camera, glam::Vec2::ZERO);
    assert_eq!(ray.origin, CAMERA_START);
    assert!(approx(ray.dir.z, -1.0, 1e-5));
    assert!(approx(ray.dir.length(), 1.0, 1e-5));
}

#[test]
fn click_through_torus_hole_hits_sphere() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let out = handle_click(&mut s, &mut tw, CENTER, &mut rng()).expect("hit");
    assert_eq!(out.target, s.find(Shape::Sphere).expect("sphere"));
    assert!(out.distance > 30.0 && out.distance < 40.0);
    assert!(out.flashed);
    assert_eq!(tw.len(), 2);
    assert!(tw.owns(out.target, TweenProperty::Scale));
    assert!(tw.owns(out.target, TweenProperty::EmissiveIntensity));
}

#[test]
fn nearest_of_overlapping_objects_wins() {
    let mut s = scene();
    let sphere = s.find(Shape::Sphere).expect("sphere");
    // park the octahedron between the camera and the sphere
    let octa = s.find(Shape::Octahedron).expect("octa");
    s.mesh_mut(octa).expect("octa").transform.position = Vec3::new(0.0, 0.0, 15.0);
    let ray = ray_from_ndc(&s.camera, CENTER.ndc());
    let (hit, _) = pick(&s, ray).expect("hit");
    assert_eq!(hit, octa);

    s.mesh_mut(octa).expect("octa").visible = false;
    let (hit, _) = pick(&s, ray).expect("hit");
    assert_eq!(hit, sphere);
}

#[test]
fn torus_tube_shadows_the_icosahedron_center() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let p = aim_at(&s, Shape::Icosahedron);
    let out = handle_click(&mut s, &mut tw, p, &mut rng()).expect("hit");
    assert_eq!(out.target, s.find(Shape::Torus).expect("torus"));
    assert!(out.distance < 32.0);
}

#[test]
fn click_on_wireframe_pulses_without_flash() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let torus = s.find(Shape::Torus).expect("torus");
    s.mesh_mut(torus).expect("torus").visible = false;
    let p = aim_at(&s, Shape::Icosahedron);
    let out = handle_click(&mut s, &mut tw, p, &mut rng()).expect("hit");
    assert_eq!(out.target, s.find(Shape::Icosahedron).expect("ico"));
    assert!(!out.flashed);
    assert_eq!(tw.len(), 1);
    let tween = tw.get(out.target, TweenProperty::Scale).expect("scale tween");
    assert_eq!(
        tween.track,
        TweenTrack::Scale {
            from: Vec3::ONE,
            to: Vec3::splat(PULSE_SCALE_FACTOR),
        }
    );
    assert!(approx(tween.total_sec(), 0.4, 1e-6));
}

#[test]
fn miss_changes_nothing() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let corner = Pointer { x: 1.0, y: 1.0 };
    assert!(handle_click(&mut s, &mut tw, corner, &mut rng()).is_none());
    assert!(tw.is_empty());
    assert!(s.meshes.iter().all(|m| m.spin_override.is_none()));
}

#[test]
fn spin_override_stays_in_range() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let mut r = rng();
    for _ in 0..20 {
        let out = handle_click(&mut s, &mut tw, CENTER, &mut r).expect("hit");
        assert!(out.spin.abs().max_element() <= SPIN_OVERRIDE_MAX);
        let mesh = s.mesh(out.target).expect("mesh");
        assert_eq!(mesh.spin_override, Some(out.spin));
    }
}

#[test]
fn only_the_octahedron_uses_its_override() {
    let mut s = scene();
    let mut tw = Tweener::new();

    let p = aim_at(&s, Shape::Octahedron);
    let octa = handle_click(&mut s, &mut tw, p, &mut rng()).expect("octa hit");
    let sphere = handle_click(&mut s, &mut tw, CENTER, &mut rng()).expect("sphere hit");
    assert_eq!(octa.target, s.find(Shape::Octahedron).expect("octa"));

    let rot = |s: &Scene, id: ObjectId| s.mesh(id).expect("mesh").transform.rotation;
    let octa_before = rot(&s, octa.target);
    let sphere_before = rot(&s, sphere.target);
    s.animate(0.0, &tw);
    let d_octa = rot(&s, octa.target) - octa_before;
    let d_sphere = rot(&s, sphere.target) - sphere_before;
    assert!((d_octa - octa.spin).abs().max_element() < 1e-6);
    assert!((d_sphere - Vec3::new(0.0, 0.01, 0.0)).abs().max_element() < 1e-6);
}

#[test]
fn pulse_returns_to_start_and_releases() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let out = handle_click(&mut s, &mut tw, CENTER, &mut rng()).expect("hit");
    let id = out.target;

    tw.advance(0.1, 0.0, &mut s);
    let mesh = s.mesh(id).expect("mesh");
    // halfway through the first leg, eased
    assert!(approx(mesh.transform.scale.x, 1.0 + 0.3 * 0.5, 1e-4));
    let em = mesh.material.emissive.expect("emissive").intensity;
    assert!(approx(em, 0.8 + (EMISSIVE_FLASH_PEAK - 0.8) * 0.5, 1e-4));

    for _ in 0..5 {
        tw.advance(0.1, 0.0, &mut s);
    }
    assert!(tw.is_empty());
    let mesh = s.mesh(id).expect("mesh");
    assert!((mesh.transform.scale - Vec3::ONE).abs().max_element() < 1e-6);
    assert!(approx(mesh.material.emissive.expect("emissive").intensity, 0.8, 1e-6));
}

#[test]
fn running_tween_owns_scale_over_oscillation() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let id = handle_click(&mut s, &mut tw, CENTER, &mut rng())
        .expect("hit")
        .target;
    tw.advance(0.1, 0.0, &mut s);
    let pulsed = s.mesh(id).expect("mesh").transform.scale;
    s.animate(1.234, &tw);
    assert_eq!(s.mesh(id).expect("mesh").transform.scale, pulsed);

    for _ in 0..4 {
        tw.advance(0.1, 0.0, &mut s);
    }
    assert!(!tw.owns(id, TweenProperty::Scale));
    s.animate(1.0, &tw);
    // sphere breathing resumes: 0.1 * sin(2.0 t)
    let expected = 1.0 + 0.1 * 2.0f32.sin();
    assert!(approx(s.mesh(id).expect("mesh").transform.scale.x, expected, 1e-5));
}

#[test]
fn pulse_hands_back_to_breathing_without_a_jump() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let mut t = 0.5;
    s.animate(t, &tw);
    let id = handle_click(&mut s, &mut tw, CENTER, &mut rng())
        .expect("hit")
        .target;
    let scale = |s: &Scene| s.mesh(id).expect("mesh").transform.scale;

    let mut released = false;
    for _ in 0..10 {
        t += 0.1;
        tw.advance(0.1, t, &mut s);
        let written = scale(&s);
        let owned = tw.owns(id, TweenProperty::Scale);
        s.animate(t, &tw);
        if !owned {
            assert!((scale(&s) - written).abs().max_element() < 1e-6);
            released = true;
            break;
        }
        assert_eq!(scale(&s), written);
    }
    assert!(released);
    // the breathing phase moved on while the pulse ran
    let start = 1.0 + 0.1 * (2.0f32 * 0.5).sin();
    assert!((scale(&s).x - start).abs() > 1e-3);
}

#[test]
fn reclick_restarts_from_original_values() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let id = handle_click(&mut s, &mut tw, CENTER, &mut rng())
        .expect("hit")
        .target;
    tw.advance(0.1, 0.0, &mut s);
    assert!(s.mesh(id).expect("mesh").transform.scale.x > 1.1);

    handle_click(&mut s, &mut tw, CENTER, &mut rng()).expect("hit again");
    assert_eq!(tw.len(), 2);
    let scale = tw.get(id, TweenProperty::Scale).expect("scale");
    assert_eq!(scale.elapsed(), 0.0);
    assert_eq!(
        scale.track,
        TweenTrack::Scale {
            from: Vec3::ONE,
            to: Vec3::splat(PULSE_SCALE_FACTOR),
        }
    );
    let flash = tw.get(id, TweenProperty::EmissiveIntensity).expect("flash");
    assert_eq!(
        flash.track,
        TweenTrack::EmissiveIntensity {
            from: 0.8,
            to: EMISSIVE_FLASH_PEAK,
        }
    );
}

#[test]
fn yoyo_progress_goes_out_and_back() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let id = s.find(Shape::Dodecahedron).expect("dodeca");
    tw.start(Tween::new(
        id,
        TweenTrack::EmissiveIntensity { from: 0.0, to: 1.0 },
        0.2,
        1,
        true,
    ));
    let intensity = |s: &Scene| s.mesh(id).expect("mesh").material.emissive.expect("em").intensity;

    tw.advance(0.1, 0.0, &mut s);
    assert!(approx(intensity(&s), 0.5, 1e-4));
    tw.advance(0.2, 0.0, &mut s);
    // halfway back down the second leg
    assert!(approx(intensity(&s), 0.5, 1e-3));
    tw.advance(0.05, 0.0, &mut s);
    assert!(intensity(&s) < 0.5);
    tw.advance(0.1, 0.0, &mut s);
    assert!(tw.is_empty());
    assert!(approx(intensity(&s), 0.0, 1e-6));
}

#[test]
fn one_way_tween_ends_at_target() {
    let mut s = scene();
    let mut tw = Tweener::new();
    let id = s.find(Shape::TorusKnot).expect("knot");
    let tween = Tween::new(
        id,
        TweenTrack::Scale {
            from: Vec3::ONE,
            to: Vec3::splat(2.0),
        },
        0.2,
        0,
        false,
    );
    assert!(!tween.is_finished());
    assert_eq!(tween.progress(), 0.0);
    assert!(!tw.start(tween));
    tw.advance(0.25, 0.0, &mut s);
    assert!(tw.is_empty());
    assert_eq!(s.mesh(id).expect("mesh").transform.scale, Vec3::splat(2.0));
}

#[test]
fn ease_in_out_quad_shape() {
    assert_eq!(ease_in_out_quad(0.0), 0.0);
    assert_eq!(ease_in_out_quad(1.0), 1.0);
    assert!(approx(ease_in_out_quad(0.5), 0.5, 1e-6));
    assert!(approx(ease_in_out_quad(0.25), 0.125, 1e-6));
    assert!(approx(ease_in_out_quad(0.75), 0.875, 1e-6));
    // clamped outside 0..1
    assert_eq!(ease_in_out_quad(-1.0), 0.0);
    assert_eq!(ease_in_out_quad(2.0), 1.0);
}

#[test]
fn projected_centers_stay_on_screen() {
    let s = scene();
    for shape in Shape::ALL {
        let p = aim_at(&s, shape);
        assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0, "{shape:?} off screen");
    }
    let v: Vec4 = s.camera.view_matrix() * Vec3::ZERO.extend(1.0);
    assert!(v.z < 0.0);
}
