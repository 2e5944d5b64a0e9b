//! WebGPU rendering module
//!
//! A single colored-triangle pipeline; every shape on screen is a CPU-built
//! mesh of flat quads and fans uploaded once per frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
