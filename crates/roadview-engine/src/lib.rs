//! Roadview engine crate.
//!
//! Platform + GPU runtime: window loop, device/surface, the mesh and line
//! renderers, shader loading and frame capture.

pub mod capture;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
