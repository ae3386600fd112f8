use roadview_geometry::pixels::{strip_row_padding, to_rgb, ChannelOrder};

use super::{CaptureError, CapturedFrame, RowOrder};

const BYTES_PER_PIXEL: u32 = 4;

/// Channel order of a readable 8-bit color format.
pub fn channel_order(format: wgpu::TextureFormat) -> Option<ChannelOrder> {
    match format {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Some(ChannelOrder::Rgba),
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => Some(ChannelOrder::Bgra),
        _ => None,
    }
}

/// Row pitch rounded up to `COPY_BYTES_PER_ROW_ALIGNMENT`.
fn padded_bytes_per_row(width: u32) -> u32 {
    (width * BYTES_PER_PIXEL).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
}

/// Color texture the capture path renders into instead of the surface.
pub struct OffscreenTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    pub width: u32,
    pub height: u32,
}

impl OffscreenTarget {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Result<Self, CaptureError> {
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyFrame);
        }
        if channel_order(format).is_none() {
            return Err(CaptureError::UnsupportedFormat(format));
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("roadview capture target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            texture,
            view,
            format,
            width,
            height,
        })
    }
}

/// Copies `texture` into a mappable buffer, waits for it and returns the
/// frame as top-down RGB.
pub fn read_texture_rgb(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
) -> Result<CapturedFrame, CaptureError> {
    let order = channel_order(format).ok_or(CaptureError::UnsupportedFormat(format))?;
    if width == 0 || height == 0 {
        return Err(CaptureError::EmptyFrame);
    }

    let padded = padded_bytes_per_row(width);
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("roadview capture staging"),
        size: u64::from(padded) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("roadview capture encoder"),
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .map_err(CaptureError::Poll)?;
    rx.recv()
        .map_err(|_| CaptureError::MapCallbackDropped)?
        .map_err(CaptureError::Map)?;

    let rgba = {
        let mapped = slice.get_mapped_range();
        strip_row_padding(
            &mapped,
            (width * BYTES_PER_PIXEL) as usize,
            padded as usize,
            height as usize,
        )
    };
    staging.unmap();

    log::debug!("read back {width}x{height} {format:?} frame");
    CapturedFrame::new(width, height, to_rgb(&rgba, order), RowOrder::TopDown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as Fmt;

    #[test]
    fn surface_formats_map_to_channel_order() {
        assert_eq!(channel_order(Fmt::Bgra8Unorm), Some(ChannelOrder::Bgra));
        assert_eq!(channel_order(Fmt::Bgra8UnormSrgb), Some(ChannelOrder::Bgra));
        assert_eq!(channel_order(Fmt::Rgba8Unorm), Some(ChannelOrder::Rgba));
        assert_eq!(channel_order(Fmt::Rgba16Float), None);
    }

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1600), 6400);
        assert_eq!(padded_bytes_per_row(1), 256);
    }
}
