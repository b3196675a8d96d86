pub mod color;
pub mod constants;
pub mod geometry;
pub mod interaction;
pub mod motion;
pub mod picking;
pub mod reactive;
pub mod scene;
pub mod state;
pub mod tween;
pub mod widgets;

pub use constants::*;
pub use geometry::Shape;
pub use reactive::{parallax_step, Pointer, ScrollResponse};
pub use scene::Scene;
pub use state::AppState;
pub use tween::Tweener;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POINTS_WGSL: &str = include_str!("../../shaders/points.wgsl");
