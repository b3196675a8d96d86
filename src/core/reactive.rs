use super::color::hsl_rgb;
use super::constants::*;
use super::geometry::Shape;
use super::scene::Scene;
use glam::{Vec2, Vec3};

/// Cursor position relative to the viewport center, each axis in [-1, 1].
/// `y` grows downward, as client coordinates do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn from_client(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Self {
        let w = viewport_w.max(1.0);
        let h = viewport_h.max(1.0);
        Self {
            x: ((client_x / w - 0.5) * 2.0).clamp(-1.0, 1.0),
            y: ((client_y / h - 0.5) * 2.0).clamp(-1.0, 1.0),
        }
    }

    /// Normalized device coordinates (y up) for ray casting.
    #[inline]
    pub fn ndc(&self) -> Vec2 {
        Vec2::new(self.x, -self.y)
    }
}

/// Exponential smoothing toward pointer-derived targets for the camera and
/// both spotlights, then re-aim the camera at the origin.
pub fn parallax_step(scene: &mut Scene, pointer: Pointer) {
    let cam = &mut scene.camera;
    let target_x = pointer.x * PARALLAX_CAMERA_AMPLITUDE;
    let target_y = -pointer.y * PARALLAX_CAMERA_AMPLITUDE;
    cam.eye.x += (target_x - cam.eye.x) * PARALLAX_CAMERA_SMOOTHING;
    cam.eye.y += (target_y - cam.eye.y) * PARALLAX_CAMERA_SMOOTHING;
    cam.look_at(Vec3::ZERO);

    for spot in &mut scene.spots {
        let tx = pointer.x * spot.follow[0];
        let ty = pointer.y * spot.follow[1];
        spot.position.x += (tx - spot.position.x) * spot.smoothing;
        spot.position.y += (ty - spot.position.y) * spot.smoothing;
    }
}

/// Everything a scroll offset drives, computed fresh on each event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollResponse {
    /// Degrees in [0, 360).
    pub hue: f32,
    pub light_intensity: f32,
    pub camera_z: f32,
    /// Radians added to the torus rotation (x, y).
    pub torus_nudge: Vec2,
}

impl ScrollResponse {
    pub fn from_offset(scroll_y: f32) -> Self {
        let hue = (scroll_y * SCROLL_HUE_PER_PX).rem_euclid(360.0);
        Self {
            // rem_euclid can round up to exactly 360 for tiny negative inputs
            hue: if hue >= 360.0 { 0.0 } else { hue },
            light_intensity: POINT_LIGHT_BASE + scroll_y * SCROLL_LIGHT_PER_PX,
            camera_z: SCROLL_CAMERA_Z_BASE - scroll_y * SCROLL_CAMERA_Z_PER_PX,
            torus_nudge: Vec2::new(
                SCROLL_TORUS_NUDGE * (1.0 + scroll_y * SCROLL_TORUS_NUDGE_GAIN),
                SCROLL_TORUS_NUDGE,
            ),
        }
    }

    pub fn apply(&self, scene: &mut Scene) {
        scene.point_light.color = hsl_rgb(self.hue, 1.0, 0.5);
        scene.point_light.base_intensity = self.light_intensity;
        scene.camera.eye.z = self.camera_z;
        if let Some(torus) = scene.find(Shape::Torus).and_then(|id| scene.mesh_mut(id)) {
            torus.transform.rotation.x += self.torus_nudge.x;
            torus.transform.rotation.y += self.torus_nudge.y;
        }
    }
}
