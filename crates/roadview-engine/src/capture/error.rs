use std::fmt;
use std::path::PathBuf;

/// A frame that could not be read back or written.
#[derive(Debug)]
pub enum CaptureError {
    /// Capture needs a color target with area.
    EmptyFrame,
    /// Only 8-bit RGBA/BGRA targets can be read back.
    UnsupportedFormat(wgpu::TextureFormat),
    /// Waiting on the GPU failed.
    Poll(wgpu::PollError),
    /// The readback buffer could not be mapped.
    Map(wgpu::BufferAsyncError),
    /// The map callback was dropped without reporting.
    MapCallbackDropped,
    /// Pixel data does not match the frame size.
    SizeMismatch { expected: usize, actual: usize },
    /// PNG encoding or the file write failed.
    Write { path: PathBuf, source: image::ImageError },
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::EmptyFrame => f.write_str("cannot capture a zero-sized frame"),
            CaptureError::UnsupportedFormat(format) => {
                write!(f, "cannot read back texture format {format:?}")
            }
            CaptureError::Poll(err) => write!(f, "device poll failed: {err}"),
            CaptureError::Map(err) => write!(f, "readback buffer map failed: {err}"),
            CaptureError::MapCallbackDropped => f.write_str("readback map callback never ran"),
            CaptureError::SizeMismatch { expected, actual } => {
                write!(f, "pixel buffer holds {actual} bytes, expected {expected}")
            }
            CaptureError::Write { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CaptureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CaptureError::Poll(err) => Some(err),
            CaptureError::Map(err) => Some(err),
            CaptureError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
