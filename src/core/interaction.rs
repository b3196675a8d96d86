use super::constants::{EMISSIVE_FLASH_PEAK, PULSE_SCALE_FACTOR, SPIN_OVERRIDE_MAX};
use super::picking::{pick, ray_from_ndc};
use super::reactive::Pointer;
use super::scene::{ObjectId, Scene};
use super::tween::{Tween, TweenTrack, Tweener};
use glam::Vec3;
use rand::Rng;

/// What a click did to the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickOutcome {
    pub target: ObjectId,
    pub distance: f32,
    /// Spin installed on the target.
    pub spin: Vec3,
    /// Whether an emissive flash was started.
    pub flashed: bool,
}

/// Pick through `pointer` and, on a hit, start the scale pulse, the
/// emissive flash (when the material has an emissive channel) and install a
/// random per-axis spin override. A miss leaves everything untouched.
pub fn handle_click(
    scene: &mut Scene,
    tweener: &mut Tweener,
    pointer: Pointer,
    rng: &mut impl Rng,
) -> Option<ClickOutcome> {
    let ray = ray_from_ndc(&scene.camera, pointer.ndc());
    let (target, distance) = pick(scene, ray)?;
    let mesh = scene.mesh_mut(target)?;

    let from = mesh.transform.scale;
    tweener.start(Tween::pulse(
        target,
        TweenTrack::Scale {
            from,
            to: from * PULSE_SCALE_FACTOR,
        },
    ));

    let flashed = match mesh.material.emissive {
        Some(em) => {
            tweener.start(Tween::pulse(
                target,
                TweenTrack::EmissiveIntensity {
                    from: em.intensity,
                    to: EMISSIVE_FLASH_PEAK,
                },
            ));
            true
        }
        None => false,
    };

    let spin = Vec3::new(
        rng.gen_range(-SPIN_OVERRIDE_MAX..=SPIN_OVERRIDE_MAX),
        rng.gen_range(-SPIN_OVERRIDE_MAX..=SPIN_OVERRIDE_MAX),
        rng.gen_range(-SPIN_OVERRIDE_MAX..=SPIN_OVERRIDE_MAX),
    );
    mesh.spin_override = Some(spin);

    log::debug!(
        "[click] hit {:?} ({:?}) at {:.2} flash={}",
        target,
        mesh.shape,
        distance,
        flashed
    );
    Some(ClickOutcome {
        target,
        distance,
        spin,
        flashed,
    })
}
