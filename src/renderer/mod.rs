//! WebGPU rendering module
//!
//! The scene is built as flat-colored triangles in arena coordinates and
//! mapped to the canvas by a letterboxing viewport.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::RenderState;
pub use scene::build;
pub use vertex::Vertex;
pub use viewport::Viewport;
