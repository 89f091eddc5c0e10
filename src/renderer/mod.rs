//! WebGPU rendering module
//!
//! Draws the filled shapes of a `Scene` as flat-colored triangles.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
