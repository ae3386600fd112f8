//! Roadview geometry crate.
//!
//! Everything here is plain CPU math: ring meshes, the pitch-only camera,
//! the street parameterization and the pixel reshaping used by frame capture.
//! The engine uploads what this crate produces; nothing here touches a GPU.

pub mod annulus;
pub mod camera;
pub mod color;
pub mod mesh;
pub mod overlay;
pub mod palette;
pub mod perspective;
pub mod pixels;
pub mod street;
pub mod vertex;

pub use annulus::{annulus, Ring};
pub use camera::{Camera, CameraUniform};
pub use color::ColorRgba;
pub use mesh::Mesh;
pub use overlay::{projection_lines, LineSegment};
pub use street::{street_distance, Street};
pub use vertex::{LineVertex, Vertex, VertexAttribute};
