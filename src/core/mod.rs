pub mod camera;
pub mod capacity;
pub mod color;
pub mod dispatch;
pub mod geometry;
pub mod lights;
pub mod orbit;
pub mod pool;
pub mod state;
pub mod stats;

pub use dispatch::DispatchTable;
pub use geometry::{GeometryKind, Vertex};
pub use state::StressState;
pub use stats::{FrameStats, Primitive, RenderInfo};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
