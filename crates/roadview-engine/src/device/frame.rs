/// One acquired swapchain image plus the encoder recording into it.
///
/// Submit it promptly: while it is alive no further frame can be acquired.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
