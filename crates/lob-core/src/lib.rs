pub mod camera;
pub mod constants;
pub mod deform;
pub mod drag;
pub mod easing;
pub mod error;
pub mod feed;
pub mod overlay;
pub mod route;
pub mod sampler;
pub mod scene;
pub mod scroll_path;
pub mod section;
pub mod sound;
pub mod store;
pub mod timeline;
pub mod transition;

pub static BALL_WGSL: &str = include_str!("../shaders/ball.wgsl");

pub use camera::*;
pub use deform::*;
pub use drag::*;
pub use easing::*;
pub use error::*;
pub use overlay::*;
pub use route::*;
pub use sampler::*;
pub use scene::*;
pub use scroll_path::*;
pub use section::*;
pub use sound::*;
pub use store::*;
pub use timeline::*;
pub use transition::*;
