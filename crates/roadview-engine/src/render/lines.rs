use roadview_geometry::LineVertex;

use crate::render::{RenderCtx, RenderTarget};

use super::common::{begin_load_pass, create_color_pipeline, vertex_attributes, ColorPipelineDesc, VertexBuffer};
use super::shader::ShaderPair;

/// Draws screen-space line segments (NDC positions, no camera).
///
/// Used for the projection-line overlay, drawn after the mesh.
pub struct LineRenderer {
    shaders: ShaderPair,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vertices: VertexBuffer,
    staged: Vec<LineVertex>,
    dirty: bool,
}

impl LineRenderer {
    pub fn new(shaders: ShaderPair) -> Self {
        Self {
            shaders,
            pipeline_format: None,
            pipeline: None,
            vertices: VertexBuffer::default(),
            staged: Vec::new(),
            dirty: false,
        }
    }

    /// Replaces the segment list; vertices pair up as (from, to).
    pub fn set_lines(&mut self, vertices: &[LineVertex]) {
        if vertices.len() % 2 != 0 {
            log::warn!("odd line vertex count {}; last vertex dropped", vertices.len());
        }
        let even = vertices.len() & !1;
        self.staged.clear();
        self.staged.extend_from_slice(&vertices[..even]);
        self.dirty = true;
    }

    pub fn segment_count(&self) -> usize {
        self.staged.len() / 2
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);

        if self.dirty {
            self.vertices.upload(
                ctx.device,
                ctx.queue,
                "roadview line vbo",
                bytemuck::cast_slice(&self.staged),
                self.staged.len() as u32,
            );
            self.dirty = false;
        }

        let Some(vbo) = self.vertices.slice() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = begin_load_pass(target.encoder, target.color_view, "roadview line pass");
        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo);
        rpass.draw(0..self.vertices.len(), 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let attributes = vertex_attributes(&LineVertex::ATTRIBUTES);
        let pipeline = create_color_pipeline(
            ctx.device,
            &ColorPipelineDesc {
                label: "roadview line pipeline",
                shaders: &self.shaders,
                format: ctx.surface_format,
                bind_group_layouts: &[],
                array_stride: std::mem::size_of::<LineVertex>() as u64,
                attributes: &attributes,
                topology: wgpu::PrimitiveTopology::LineList,
            },
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}
