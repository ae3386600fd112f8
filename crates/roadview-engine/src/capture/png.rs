use std::path::Path;

use roadview_geometry::pixels::flip_rows;

use super::CaptureError;

/// Row order of a captured RGB buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RowOrder {
    /// First row is the top of the image (wgpu readback, image files).
    TopDown,
    /// First row is the bottom of the image (GL-style readback).
    BottomUp,
}

/// Tightly packed RGB frame, 3 bytes per pixel.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub row_order: RowOrder,
}

impl CapturedFrame {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>, row_order: RowOrder) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(CaptureError::SizeMismatch {
                expected,
                actual: rgb.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgb,
            row_order,
        })
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 3
    }

    /// Flips a bottom-up buffer in place; top-down buffers are left alone.
    pub fn into_top_down(mut self) -> Self {
        if self.row_order == RowOrder::BottomUp {
            let row_bytes = self.row_bytes();
            flip_rows(&mut self.rgb, row_bytes, self.height as usize);
            self.row_order = RowOrder::TopDown;
        }
        self
    }

    /// Writes the frame as an 8-bit RGB PNG, replacing any existing file.
    pub fn write_png(self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let path = path.as_ref();
        let frame = self.into_top_down();
        let (width, height) = (frame.width, frame.height);
        let expected = frame.rgb.len();

        let Some(img) = image::RgbImage::from_raw(width, height, frame.rgb) else {
            return Err(CaptureError::SizeMismatch {
                expected: width as usize * height as usize * 3,
                actual: expected,
            });
        };

        img.save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| CaptureError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!("wrote {}x{} frame to {}", width, height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2×`height` frame whose row `r` is filled with byte `r`.
    fn striped(height: u32, row_order: RowOrder) -> CapturedFrame {
        let rgb = (0..height).flat_map(|r| std::iter::repeat_n(r as u8, 6)).collect();
        CapturedFrame::new(2, height, rgb, row_order).unwrap()
    }

    fn temp_png(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("roadview-{}-{name}", std::process::id()))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn wrong_length_is_rejected() {
        let err = CapturedFrame::new(2, 2, vec![0; 11], RowOrder::TopDown).unwrap_err();
        assert!(matches!(err, CaptureError::SizeMismatch { expected: 12, actual: 11 }));
    }

    // ── row order ─────────────────────────────────────────────────────────

    #[test]
    fn bottom_up_is_flipped() {
        let frame = striped(3, RowOrder::BottomUp).into_top_down();
        assert_eq!(frame.row_order, RowOrder::TopDown);
        assert_eq!(&frame.rgb[..6], &[2; 6]);
        assert_eq!(&frame.rgb[12..], &[0; 6]);
    }

    #[test]
    fn bottom_up_single_row_only_changes_order() {
        let frame = striped(1, RowOrder::BottomUp).into_top_down();
        assert_eq!(frame.row_order, RowOrder::TopDown);
        assert_eq!(frame.rgb, vec![0; 6]);
    }

    #[test]
    fn top_down_is_untouched() {
        let frame = striped(4, RowOrder::TopDown).into_top_down();
        assert_eq!(&frame.rgb[..6], &[0; 6]);
    }

    // ── png ───────────────────────────────────────────────────────────────

    #[test]
    fn png_round_trips_pixels() {
        let path = temp_png("stripes.png");
        striped(4, RowOrder::BottomUp).write_png(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(img.get_pixel(0, 0).0, [3, 3, 3]);
        assert_eq!(img.get_pixel(1, 3).0, [0, 0, 0]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let frame = striped(1, RowOrder::TopDown);
        let err = frame.write_png("/nonexistent-dir/roadview/out.png").unwrap_err();
        assert!(matches!(err, CaptureError::Write { .. }));
        assert!(err.to_string().contains("out.png"));
    }
}
