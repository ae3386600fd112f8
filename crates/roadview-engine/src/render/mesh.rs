use roadview_geometry::{Mesh, Vertex};

use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    begin_load_pass, camera_ubo_min_binding_size, create_color_pipeline, vertex_attributes,
    ColorPipelineDesc, VertexBuffer,
};
use super::shader::ShaderPair;

/// Draws a world-space triangle mesh through the camera uniform.
///
/// The mesh is staged on the CPU by [`set_mesh`](Self::set_mesh) and
/// uploaded on the next render, so a scene can be rebuilt every frame
/// without touching the GPU twice.
pub struct MeshRenderer {
    shaders: ShaderPair,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    vertices: VertexBuffer,
    staged: Vec<Vertex>,
    dirty: bool,
}

impl MeshRenderer {
    pub fn new(shaders: ShaderPair) -> Self {
        Self {
            shaders,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            camera_ubo: None,
            vertices: VertexBuffer::default(),
            staged: Vec::new(),
            dirty: false,
        }
    }

    /// Replaces the mesh drawn from the next frame on.
    pub fn set_mesh(&mut self, mesh: &Mesh) {
        self.staged.clear();
        self.staged.extend_from_slice(mesh.vertices());
        self.dirty = true;
    }

    /// Vertex count of the staged mesh.
    pub fn vertex_count(&self) -> usize {
        self.staged.len()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        if self.dirty {
            self.vertices.upload(
                ctx.device,
                ctx.queue,
                "roadview mesh vbo",
                bytemuck::cast_slice(&self.staged),
                self.staged.len() as u32,
            );
            self.dirty = false;
        }

        let Some(vbo) = self.vertices.slice() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(ubo) = self.camera_ubo.as_ref() else { return };

        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ctx.camera.uniform()));

        let mut rpass = begin_load_pass(target.encoder, target.color_view, "roadview mesh pass");
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo);
        rpass.draw(0..self.vertices.len(), 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("roadview mesh bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: camera_ubo_min_binding_size(),
                    },
                    count: None,
                }],
            });

        let attributes = vertex_attributes(&Vertex::ATTRIBUTES);
        let pipeline = create_color_pipeline(
            ctx.device,
            &ColorPipelineDesc {
                label: "roadview mesh pipeline",
                shaders: &self.shaders,
                format: ctx.surface_format,
                bind_group_layouts: &[&bind_group_layout],
                array_stride: std::mem::size_of::<Vertex>() as u64,
                attributes: &attributes,
                topology: wgpu::PrimitiveTopology::TriangleList,
            },
        );
        log::debug!("mesh pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("roadview camera ubo"),
            size: std::mem::size_of::<roadview_geometry::CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("roadview mesh bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }
}
