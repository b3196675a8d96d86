use super::constants::{PULSE_LEG_SEC, PULSE_REPEAT};
use super::scene::{Mesh, ObjectId, Scene};
use fnv::FnvHashMap;
use glam::Vec3;

// Time-boxed property animations with yoyo/repeat, advanced from the frame
// tick. A running tween owns its (object, property) pair; the frame loop
// leaves owned properties alone until the tween completes.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    Scale,
    EmissiveIntensity,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenTrack {
    Scale { from: Vec3, to: Vec3 },
    EmissiveIntensity { from: f32, to: f32 },
}

impl TweenTrack {
    pub fn property(&self) -> TweenProperty {
        match self {
            TweenTrack::Scale { .. } => TweenProperty::Scale,
            TweenTrack::EmissiveIntensity { .. } => TweenProperty::EmissiveIntensity,
        }
    }

    fn write(&self, p: f32, t: f32, mesh: &mut Mesh) {
        match *self {
            TweenTrack::Scale { from, to } => {
                // anchored to the live breathing scale, so release lands where animate resumes
                let base = mesh.breathing_scale(t).unwrap_or(from);
                mesh.transform.scale = base.lerp(to, p);
            }
            TweenTrack::EmissiveIntensity { from, to } => {
                if let Some(em) = mesh.material.emissive.as_mut() {
                    em.intensity = from + (to - from) * p;
                }
            }
        }
    }
}

/// Quadratic ease-in-out on `t` in 0..1.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: ObjectId,
    pub track: TweenTrack,
    /// Duration of one leg (from -> to) in seconds.
    pub leg_sec: f32,
    /// Extra legs after the first.
    pub repeat: u32,
    /// Odd legs run backwards when set.
    pub yoyo: bool,
    elapsed: f32,
}

impl Tween {
    pub fn new(target: ObjectId, track: TweenTrack, leg_sec: f32, repeat: u32, yoyo: bool) -> Self {
        Self {
            target,
            track,
            leg_sec: leg_sec.max(1e-4),
            repeat,
            yoyo,
            elapsed: 0.0,
        }
    }

    /// The click pulse: out and back once with ease-in-out.
    pub fn pulse(target: ObjectId, track: TweenTrack) -> Self {
        Self::new(target, track, PULSE_LEG_SEC, PULSE_REPEAT, true)
    }

    pub fn total_sec(&self) -> f32 {
        self.leg_sec * (self.repeat + 1) as f32
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_sec()
    }

    /// Eased progress toward `to` at the current elapsed time.
    pub fn progress(&self) -> f32 {
        let legs = self.repeat + 1;
        if self.is_finished() {
            return if self.yoyo && legs % 2 == 0 { 0.0 } else { 1.0 };
        }
        let leg = ((self.elapsed / self.leg_sec).floor() as u32).min(legs - 1);
        let local = (self.elapsed - leg as f32 * self.leg_sec) / self.leg_sec;
        if self.yoyo && leg % 2 == 1 {
            ease_in_out_quad(1.0 - local)
        } else {
            ease_in_out_quad(local)
        }
    }
}

#[derive(Default)]
pub struct Tweener {
    active: FnvHashMap<(ObjectId, TweenProperty), Tween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`. If the same property of the same object is already
    /// animating, that tween restarts with its original endpoints instead of
    /// stacking a second one on a mid-flight value. Returns true on restart.
    pub fn start(&mut self, mut tween: Tween) -> bool {
        let key = (tween.target, tween.track.property());
        let restarted = match self.active.get(&key) {
            Some(prev) => {
                tween.track = prev.track;
                true
            }
            None => false,
        };
        self.active.insert(key, tween);
        restarted
    }

    #[inline]
    pub fn owns(&self, target: ObjectId, property: TweenProperty) -> bool {
        self.active.contains_key(&(target, property))
    }

    pub fn get(&self, target: ObjectId, property: TweenProperty) -> Option<&Tween> {
        self.active.get(&(target, property))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Step every tween by `dt` seconds, write values into the scene at loop
    /// time `t` and release finished tweens (after writing their final value).
    pub fn advance(&mut self, dt: f32, t: f32, scene: &mut Scene) {
        for tween in self.active.values_mut() {
            tween.elapsed += dt.max(0.0);
            if let Some(mesh) = scene.mesh_mut(tween.target) {
                tween.track.write(tween.progress(), t, mesh);
            }
        }
        self.active.retain(|_, t| !t.is_finished());
    }
}
