//! Frame capture.
//!
//! A frame is rendered into an offscreen texture of the surface format,
//! copied into a mappable buffer, reshaped to tightly packed RGB and written
//! as PNG.

mod error;
mod png;
mod readback;

pub use error::CaptureError;
pub use png::{CapturedFrame, RowOrder};
pub use readback::{channel_order, read_texture_rgb, OffscreenTarget};
