use roadview_geometry::{Camera, ColorRgba};
use winit::window::Window;

use crate::capture::{read_texture_rgb, CaptureError, CapturedFrame, OffscreenTarget};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Window handle plus size helpers.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

fn clear_color(c: ColorRgba) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(c.r),
        g: f64::from(c.g),
        b: f64::from(c.b),
        a: f64::from(c.a),
    }
}

impl FrameCtx<'_, '_> {
    /// Clears the surface, calls `draw` and presents.
    ///
    /// Surface loss is handled here: the frame is skipped after a
    /// reconfigure and only an out-of-memory surface ends the app.
    pub fn render<F>(&mut self, clear: ColorRgba, camera: Camera, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("surface out of memory, exiting");
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let rctx = RenderCtx::new(self.gpu.device(), self.gpu.queue(), self.gpu.surface_format(), camera);

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            target.clear(clear_color(clear));
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }

    /// Renders the same way as [`render`](Self::render) into an offscreen
    /// texture and reads it back as RGB instead of presenting.
    pub fn capture<F>(&mut self, clear: ColorRgba, camera: Camera, draw: F) -> Result<CapturedFrame, CaptureError>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let size = self.gpu.size();
        let device = self.gpu.device();
        let queue = self.gpu.queue();
        let format = self.gpu.surface_format();

        let offscreen = OffscreenTarget::new(device, format, size.width, size.height)?;
        let rctx = RenderCtx::new(device, queue, format, camera);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("roadview capture render encoder"),
        });
        {
            let mut target = RenderTarget::new(&mut encoder, &offscreen.view);
            target.clear(clear_color(clear));
            draw(&rctx, &mut target);
        }
        queue.submit(std::iter::once(encoder.finish()));

        read_texture_rgb(device, queue, &offscreen.texture, format, offscreen.width, offscreen.height)
    }
}
