//! Components provided by the engine.

pub use camera::{Camera, CameraComponent};
pub use light::LightComponent;
pub use renderable::RenderableComponent;
pub use spin::SpinComponent;
pub use transform::TransformComponent;
pub use vertex_color::VertexColorComponent;

mod camera;
mod light;
mod renderable;
mod spin;
mod transform;
mod vertex_color;
