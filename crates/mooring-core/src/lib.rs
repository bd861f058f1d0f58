pub mod assets;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod curve;
pub mod error;
pub mod fly;
pub mod instancer;
pub mod link;
pub mod mesh;
pub mod nodes;
pub mod pick;
pub mod presets;
pub mod scene;
pub mod tween;
pub mod viewer;

pub use bounds::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use curve::*;
pub use error::*;
pub use fly::*;
pub use instancer::*;
pub use mesh::*;
pub use nodes::*;
pub use pick::*;
pub use presets::*;
pub use scene::*;
pub use tween::*;
pub use viewer::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
