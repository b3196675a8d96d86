use glam::Vec3;

// Scene, motion and reactive tuning shared by the frame loop and the handlers.

// Camera
pub const CAMERA_FOV_DEG: f32 = 70.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 30.0);
pub const MAX_PIXEL_RATIO: f64 = 2.0; // bounds fill-rate on dense displays

// Palette (0xRRGGBB)
pub const TORUS_COLOR: u32 = 0xff0055;
pub const ICO_COLOR: u32 = 0x66ccff;
pub const DODECA_COLOR: u32 = 0xffb347;
pub const OCTA_COLOR: u32 = 0x9d4dff;
pub const KNOT_COLOR: u32 = 0x00ffc8;
pub const SPHERE_COLOR: u32 = 0xffffff;
pub const GLOW_COLOR: u32 = 0xff66cc;
pub const POINT_LIGHT_COLOR: u32 = 0xff0055;
pub const SPOT_A_COLOR: u32 = 0x33ccff;
pub const SPOT_B_COLOR: u32 = 0xff33aa;
pub const AMBIENT_COLOR: u32 = 0x404040;

// Particle fields
pub const STAR_COUNT: usize = 800;
pub const STAR_SPREAD: f32 = 180.0;
pub const STAR_SIZE: f32 = 0.6;
pub const STAR_SATURATION: f32 = 0.7;
pub const STAR_LIGHTNESS: f32 = 0.75;
pub const STAR_SPIN_Y: f32 = 0.0008;
pub const GLOW_COUNT: usize = 140;
pub const GLOW_SPREAD: f32 = 90.0;
pub const GLOW_SIZE: f32 = 1.8;
pub const GLOW_OPACITY: f32 = 0.55;
pub const GLOW_BOB_AMPLITUDE: f32 = 0.002; // added per tick, keyed by point index

// Lights
pub const POINT_LIGHT_BASE: f32 = 1.2;
pub const POINT_LIGHT_RANGE: f32 = 200.0;
pub const POINT_LIGHT_START: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const SPOT_INTENSITY: f32 = 2.5;
pub const SPOT_RANGE: f32 = 120.0;
pub const SPOT_ANGLE_RAD: f32 = 0.45;
pub const SPOT_PENUMBRA: f32 = 0.4;
pub const SPOT_A_START: Vec3 = Vec3::new(-15.0, 12.0, 20.0);
pub const SPOT_B_START: Vec3 = Vec3::new(15.0, -12.0, 20.0);
pub const AMBIENT_INTENSITY: f32 = 0.6;

// Parallax (fraction of remaining distance covered per frame)
pub const PARALLAX_CAMERA_AMPLITUDE: f32 = 1.5;
pub const PARALLAX_CAMERA_SMOOTHING: f32 = 0.05;
pub const SPOT_A_FOLLOW: [f32; 2] = [8.0, -6.0];
pub const SPOT_A_SMOOTHING: f32 = 0.08;
pub const SPOT_B_FOLLOW: [f32; 2] = [-6.0, 6.0];
pub const SPOT_B_SMOOTHING: f32 = 0.06;

// Scroll response
pub const SCROLL_HUE_PER_PX: f32 = 0.2;
pub const SCROLL_LIGHT_PER_PX: f32 = 0.0015;
pub const SCROLL_CAMERA_Z_BASE: f32 = 30.0;
pub const SCROLL_CAMERA_Z_PER_PX: f32 = 0.01;
pub const SCROLL_TORUS_NUDGE: f32 = 0.002;
pub const SCROLL_TORUS_NUDGE_GAIN: f32 = 0.0005;

// Click pulse
pub const PULSE_SCALE_FACTOR: f32 = 1.3;
pub const PULSE_LEG_SEC: f32 = 0.2; // one direction; yoyo doubles it
pub const PULSE_REPEAT: u32 = 1;
pub const EMISSIVE_FLASH_PEAK: f32 = 1.6;
pub const SPIN_OVERRIDE_MAX: f32 = 0.03;
