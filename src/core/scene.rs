use super::color::{hex_rgb, hsl_rgb};
use super::constants::*;
use super::geometry::{MeshData, Shape};
use super::motion::{Axis, Channel, LightPulse, MotionProfile, Oscillation, Wave};
use super::tween::{TweenProperty, Tweener};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

// Plain-data scene model: what to draw and where. The renderer reads it,
// the frame loop and the input handlers write it.

/// Index into `Scene::meshes`, stable for the life of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emissive {
    pub color: Vec3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub opacity: f32,
    pub transparent: bool,
    pub wireframe: bool,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Option<Emissive>,
}

impl Material {
    pub fn standard(hex: u32, metalness: f32, roughness: f32) -> Self {
        Self {
            color: hex_rgb(hex),
            opacity: 1.0,
            transparent: false,
            wireframe: false,
            metalness,
            roughness,
            emissive: None,
        }
    }

    pub fn wire(hex: u32, opacity: f32) -> Self {
        Self {
            opacity,
            transparent: opacity < 1.0,
            wireframe: true,
            ..Self::standard(hex, 0.0, 1.0)
        }
    }

    pub fn glowing(mut self, hex: u32, intensity: f32) -> Self {
        self.emissive = Some(Emissive {
            color: hex_rgb(hex),
            intensity,
        });
        self
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub shape: Shape,
    pub transform: Transform,
    /// Pose the oscillations are measured from.
    pub rest: Transform,
    pub material: Material,
    pub visible: bool,
    pub motion: MotionProfile,
    /// Per-axis spin installed by a click; read by the frame loop.
    pub spin_override: Option<Vec3>,
}

impl Mesh {
    pub fn new(shape: Shape, position: Vec3, material: Material, motion: MotionProfile) -> Self {
        let rest = Transform::at(position);
        Self {
            shape,
            transform: rest,
            rest,
            material,
            visible: true,
            motion,
            spin_override: None,
        }
    }

    /// Closed-form scale at time `t`, when the profile drives scale at all.
    pub fn breathing_scale(&self, t: f32) -> Option<Vec3> {
        self.motion
            .drives(Channel::Scale)
            .then(|| self.rest.scale * (Vec3::ONE + self.motion.channel_offset(Channel::Scale, t)))
    }

    pub fn bounding_radius(&self) -> f32 {
        self.shape.bounding_radius() * self.transform.scale.max_element()
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Vec3>,
    pub size: f32,
    pub opacity: f32,
    pub rotation: Vec3,
    pub spin: Vec3,
    pub visible: bool,
    /// Positions changed since the last upload.
    pub dirty: bool,
}

impl ParticleField {
    /// Dense background field, one random hue per point.
    pub fn stars(rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(STAR_COUNT);
        let mut colors = Vec::with_capacity(STAR_COUNT);
        for _ in 0..STAR_COUNT {
            positions.push(random_in_cube(rng, STAR_SPREAD));
            let hue = rng.gen_range(0.0..360.0);
            colors.push(hsl_rgb(hue, STAR_SATURATION, STAR_LIGHTNESS));
        }
        Self {
            positions,
            colors,
            size: STAR_SIZE,
            opacity: 1.0,
            rotation: Vec3::ZERO,
            spin: Vec3::new(0.0, STAR_SPIN_Y, 0.0),
            visible: true,
            dirty: true,
        }
    }

    /// Sparse layer of large soft points that bob vertically.
    pub fn glow(rng: &mut impl Rng) -> Self {
        let positions = (0..GLOW_COUNT)
            .map(|_| random_in_cube(rng, GLOW_SPREAD))
            .collect();
        Self {
            positions,
            colors: vec![hex_rgb(GLOW_COLOR); GLOW_COUNT],
            size: GLOW_SIZE,
            opacity: GLOW_OPACITY,
            rotation: Vec3::ZERO,
            spin: Vec3::new(0.0, -STAR_SPIN_Y * 0.5, 0.0),
            visible: true,
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Nudge every point vertically by a sine keyed on its index and `t`.
    pub fn bob(&mut self, t: f32) {
        for (i, p) in self.positions.iter_mut().enumerate() {
            p.y += (t + i as f32).sin() * GLOW_BOB_AMPLITUDE;
        }
        self.dirty = true;
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }
}

fn random_in_cube(rng: &mut impl Rng, spread: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
    )
}

#[derive(Clone, Debug)]
pub struct PointLight {
    pub color: Vec3,
    /// Baseline set by the scroll handler; the frame pulse rides on top.
    pub base_intensity: f32,
    pub intensity: f32,
    pub range: f32,
    pub position: Vec3,
    pub pulse: LightPulse,
}

#[derive(Clone, Debug)]
pub struct SpotLight {
    pub color: Vec3,
    pub base_intensity: f32,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub range: f32,
    pub visible: bool,
    pub pulse: LightPulse,
    /// Pointer-to-position gain per axis; the sign picks attraction or repulsion.
    pub follow: [f32; 2],
    pub smoothing: f32,
}

impl SpotLight {
    fn new(hex: u32, position: Vec3, follow: [f32; 2], smoothing: f32, pulse: LightPulse) -> Self {
        Self {
            color: hex_rgb(hex),
            base_intensity: SPOT_INTENSITY,
            intensity: SPOT_INTENSITY,
            position,
            target: Vec3::ZERO,
            angle: SPOT_ANGLE_RAD,
            penumbra: SPOT_PENUMBRA,
            range: SPOT_RANGE,
            visible: true,
            pulse,
            follow,
            smoothing,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

pub struct Scene {
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    pub stars: ParticleField,
    pub glow: ParticleField,
    pub point_light: PointLight,
    pub spots: [SpotLight; 2],
    pub ambient: AmbientLight,
    geometry: [MeshData; 6],
    interactive: Vec<ObjectId>,
}

impl Scene {
    /// Build the full backdrop for a `width` x `height` viewport.
    pub fn build(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let meshes = vec![
            Mesh::new(
                Shape::Torus,
                Vec3::ZERO,
                Material::standard(TORUS_COLOR, 0.5, 0.2).glowing(TORUS_COLOR, 0.15),
                MotionProfile::spinning(Vec3::new(0.01, 0.006, 0.0))
                    .with(Oscillation::new(Channel::Scale, Axis::All, 0.04, 0.8)),
            ),
            Mesh::new(
                Shape::Icosahedron,
                Vec3::new(-12.0, -4.0, -6.0),
                Material::wire(ICO_COLOR, 0.6),
                MotionProfile::spinning(Vec3::new(0.0, -0.005, 0.0))
                    .with(Oscillation::new(Channel::Position, Axis::Y, 1.5, 0.7))
                    .with(Oscillation::new(Channel::Position, Axis::X, 0.8, 0.4).phased(0.0, Wave::Cos)),
            ),
            Mesh::new(
                Shape::Dodecahedron,
                Vec3::new(20.0, 10.0, -10.0),
                Material::standard(DODECA_COLOR, 0.3, 0.4).glowing(DODECA_COLOR, 0.2),
                MotionProfile::spinning(Vec3::new(0.004, 0.007, 0.0))
                    .with(Oscillation::new(Channel::Position, Axis::Y, 2.0, 0.6).phased(1.0, Wave::Sin))
                    .with(Oscillation::new(Channel::Scale, Axis::All, 0.08, 1.1)),
            ),
            Mesh::new(
                Shape::Octahedron,
                Vec3::new(18.0, -12.0, -4.0),
                Material::standard(OCTA_COLOR, 0.6, 0.25).glowing(OCTA_COLOR, 0.3),
                MotionProfile::spinning(Vec3::new(0.012, 0.008, 0.004))
                    .with(Oscillation::new(Channel::Position, Axis::X, 1.0, 0.9).phased(0.0, Wave::Cos))
                    .with(Oscillation::new(Channel::Position, Axis::Z, 1.5, 0.5))
                    .overridable(),
            ),
            Mesh::new(
                Shape::TorusKnot,
                Vec3::new(-20.0, 12.0, -12.0),
                Material::standard(KNOT_COLOR, 0.7, 0.3).glowing(KNOT_COLOR, 0.25),
                MotionProfile::spinning(Vec3::new(0.003, 0.009, 0.002))
                    .with(Oscillation::new(Channel::Position, Axis::Y, 1.0, 1.3).phased(2.0, Wave::Sin))
                    .with(Oscillation::new(Channel::Scale, Axis::All, 0.06, 0.7)),
            ),
            Mesh::new(
                Shape::Sphere,
                Vec3::new(0.0, 0.0, -8.0),
                Material::standard(SPHERE_COLOR, 0.1, 0.6).glowing(SPHERE_COLOR, 0.8),
                MotionProfile::spinning(Vec3::new(0.0, 0.01, 0.0))
                    .with(Oscillation::new(Channel::Position, Axis::Y, 0.9, 1.6).phased(0.0, Wave::Cos))
                    .with(Oscillation::new(Channel::Scale, Axis::All, 0.1, 2.0)),
            ),
        ];
        let interactive = (0..meshes.len()).map(ObjectId).collect();

        let point_light = PointLight {
            color: hex_rgb(POINT_LIGHT_COLOR),
            base_intensity: POINT_LIGHT_BASE,
            intensity: POINT_LIGHT_BASE,
            range: POINT_LIGHT_RANGE,
            position: POINT_LIGHT_START,
            pulse: LightPulse {
                amplitude: 0.3,
                frequency: 1.2,
                phase: 0.0,
                wave: Wave::Sin,
            },
        };
        let spots = [
            SpotLight::new(
                SPOT_A_COLOR,
                SPOT_A_START,
                SPOT_A_FOLLOW,
                SPOT_A_SMOOTHING,
                LightPulse {
                    amplitude: 0.8,
                    frequency: 0.9,
                    phase: 0.0,
                    wave: Wave::Sin,
                },
            ),
            SpotLight::new(
                SPOT_B_COLOR,
                SPOT_B_START,
                SPOT_B_FOLLOW,
                SPOT_B_SMOOTHING,
                LightPulse {
                    amplitude: 0.8,
                    frequency: 0.7,
                    phase: FRAC_PI_2,
                    wave: Wave::Cos,
                },
            ),
        ];

        let scene = Self {
            camera: Camera::new(width / height.max(1.0)),
            meshes,
            stars: ParticleField::stars(rng),
            glow: ParticleField::glow(rng),
            point_light,
            spots,
            ambient: AmbientLight {
                color: hex_rgb(AMBIENT_COLOR),
                intensity: AMBIENT_INTENSITY,
            },
            geometry: Shape::ALL.map(Shape::mesh),
            interactive,
        };
        log::info!(
            "[scene] meshes={} stars={} glow={}",
            scene.meshes.len(),
            scene.stars.len(),
            scene.glow.len()
        );
        scene
    }

    /// Meshes eligible for click picking, in build order.
    pub fn interactive(&self) -> &[ObjectId] {
        &self.interactive
    }

    /// Shared triangle data for `shape`, used by the renderer and the picker.
    pub fn geometry(&self, shape: Shape) -> &MeshData {
        &self.geometry[shape.index()]
    }

    pub fn mesh(&self, id: ObjectId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_mut(&mut self, id: ObjectId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn find(&self, shape: Shape) -> Option<ObjectId> {
        self.meshes.iter().position(|m| m.shape == shape).map(ObjectId)
    }

    /// Show or hide every FX-gated layer at once: stars, glow and both spots.
    pub fn set_fx_layers(&mut self, visible: bool) {
        self.stars.visible = visible;
        self.glow.visible = visible;
        for spot in &mut self.spots {
            spot.visible = visible;
        }
    }

    /// Visibility of the gated layers: `[stars, glow, spot a, spot b]`.
    pub fn fx_layers(&self) -> [bool; 4] {
        [
            self.stars.visible,
            self.glow.visible,
            self.spots[0].visible,
            self.spots[1].visible,
        ]
    }

    /// Advance every object to time `t` (seconds since the loop started).
    ///
    /// Rotation accumulates per call; position and scale are closed-form
    /// around the rest pose. Properties owned by a running tween are skipped.
    pub fn animate(&mut self, t: f32, tweener: &Tweener) {
        for (i, mesh) in self.meshes.iter_mut().enumerate() {
            let id = ObjectId(i);
            mesh.transform.rotation += mesh.motion.effective_spin(mesh.spin_override);
            if mesh.motion.drives(Channel::Position) {
                mesh.transform.position =
                    mesh.rest.position + mesh.motion.channel_offset(Channel::Position, t);
            }
            if !tweener.owns(id, TweenProperty::Scale) {
                if let Some(scale) = mesh.breathing_scale(t) {
                    mesh.transform.scale = scale;
                }
            }
        }

        self.stars.rotation += self.stars.spin;
        self.glow.rotation += self.glow.spin;
        self.glow.bob(t);

        let pl = &mut self.point_light;
        pl.intensity = pl.pulse.intensity(pl.base_intensity, t);
        for spot in &mut self.spots {
            spot.intensity = spot.pulse.intensity(spot.base_intensity, t);
        }
    }
}
