//! Pixel-buffer reshaping for frame capture.
//!
//! Buffers are tightly packed, row-major byte arrays unless stated otherwise.

/// Reverses the row order of a tightly packed image in place.
///
/// Converts between bottom-up (GL-style) and top-down (raster file) row
/// order. The middle row of an odd-height image stays put.
pub fn flip_rows(pixels: &mut [u8], row_bytes: usize, height: usize) {
    debug_assert!(pixels.len() >= row_bytes * height);
    for line in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - line - 1) * row_bytes);
        top[line * row_bytes..(line + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
    }
}

/// Drops per-row padding from a buffer whose rows are `padded_row_bytes`
/// apart, keeping the first `row_bytes` of each row.
pub fn strip_row_padding(padded: &[u8], row_bytes: usize, padded_row_bytes: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_bytes * height);
    for row in 0..height {
        let start = row * padded_row_bytes;
        out.extend_from_slice(&padded[start..start + row_bytes]);
    }
    out
}

/// Channel order of a 4-byte-per-pixel buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

/// Packs 4-byte pixels into 3-byte RGB, dropping alpha.
pub fn to_rgb(pixels: &[u8], order: ChannelOrder) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        match order {
            ChannelOrder::Rgba => out.extend_from_slice(&[px[0], px[1], px[2]]),
            ChannelOrder::Bgra => out.extend_from_slice(&[px[2], px[1], px[0]]),
        }
    }
    out
}
