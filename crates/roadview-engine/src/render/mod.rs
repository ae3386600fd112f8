//! GPU rendering subsystem.
//!
//! Two passes draw into the same color target after a clear: the world-space
//! ring mesh, then the screen-space projection lines. There is no depth
//! buffer; later geometry simply covers earlier geometry.

mod common;
mod ctx;
pub mod lines;
pub mod mesh;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use lines::LineRenderer;
pub use mesh::MeshRenderer;
pub use shader::{ShaderError, ShaderFile, ShaderPair, ShaderStage};
