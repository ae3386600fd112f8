//! Shared GPU helpers used by the mesh and line renderers.

use roadview_geometry::vertex::offsets_of;
use roadview_geometry::{CameraUniform, VertexAttribute};

use super::shader::{ShaderPair, FRAGMENT_ENTRY, VERTEX_ENTRY};

// ── blend ─────────────────────────────────────────────────────────────────

/// Classic `src·a + dst·(1 − a)` blending; vertex colors are not
/// premultiplied.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── vertex layout ─────────────────────────────────────────────────────────

/// Shader location for a named attribute.
fn location_of(name: &str) -> Option<u32> {
    match name {
        "pos" => Some(0),
        "col" => Some(1),
        _ => None,
    }
}

fn format_of(components: u32) -> Option<wgpu::VertexFormat> {
    match components {
        1 => Some(wgpu::VertexFormat::Float32),
        2 => Some(wgpu::VertexFormat::Float32x2),
        3 => Some(wgpu::VertexFormat::Float32x3),
        4 => Some(wgpu::VertexFormat::Float32x4),
        _ => None,
    }
}

/// Turns a named attribute table into wgpu attributes.
///
/// Offsets come from the table order; attributes the shaders do not know
/// are skipped with a warning but still occupy their slot in the stride.
pub(super) fn vertex_attributes(table: &[VertexAttribute]) -> Vec<wgpu::VertexAttribute> {
    table
        .iter()
        .zip(offsets_of(table))
        .filter_map(|(attr, offset)| {
            let (Some(shader_location), Some(format)) =
                (location_of(attr.name), format_of(attr.components))
            else {
                log::warn!(
                    "vertex attribute `{}` ({} floats) has no shader binding",
                    attr.name,
                    attr.components
                );
                return None;
            };
            Some(wgpu::VertexAttribute {
                format,
                offset: u64::from(offset) * std::mem::size_of::<f32>() as u64,
                shader_location,
            })
        })
        .collect()
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Fixed state shared by both color passes: straight alpha, no depth, no
/// culling. Draw order decides what ends up on top.
pub(super) struct ColorPipelineDesc<'a> {
    pub label: &'a str,
    pub shaders: &'a ShaderPair,
    pub format: wgpu::TextureFormat,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub array_stride: u64,
    pub attributes: &'a [wgpu::VertexAttribute],
    pub topology: wgpu::PrimitiveTopology,
}

pub(super) fn create_color_pipeline(device: &wgpu::Device, desc: &ColorPipelineDesc<'_>) -> wgpu::RenderPipeline {
    let (vs, fs) = desc.shaders.create_modules(device);

    let layout_label = format!("{} layout", desc.label);
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&layout_label),
        bind_group_layouts: desc.bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &vs,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: desc.array_stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: desc.attributes,
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fs,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: Some(straight_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Begins a pass that draws over what is already in the target.
pub(super) fn begin_load_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    view: &'e wgpu::TextureView,
    label: &str,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

// ── camera UBO binding size ───────────────────────────────────────────────

pub(super) fn camera_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
}

// ── growable vertex buffer ────────────────────────────────────────────────

/// A vertex buffer that is recreated only when data outgrows it.
#[derive(Default)]
pub(super) struct VertexBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
    len: u32,
}

impl VertexBuffer {
    /// Uploads `bytes` holding `count` vertices.
    pub(super) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, label: &str, bytes: &[u8], count: u32) {
        self.len = count;
        if bytes.is_empty() {
            return;
        }
        let required = bytes.len() as u64;
        if self.buffer.is_none() || required > self.capacity {
            let capacity = grown_capacity(required);
            log::debug!("{label}: growing vertex buffer to {capacity} bytes");
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }
        if let Some(buffer) = self.buffer.as_ref() {
            queue.write_buffer(buffer, 0, bytes);
        }
    }

    pub(super) fn len(&self) -> u32 {
        self.len
    }

    /// The buffer, if it holds at least one vertex.
    pub(super) fn slice(&self) -> Option<wgpu::BufferSlice<'_>> {
        if self.len == 0 {
            return None;
        }
        self.buffer.as_ref().map(|b| b.slice(..))
    }
}

/// Next power of two, at least 4 KiB, rounded to `COPY_BUFFER_ALIGNMENT`.
fn grown_capacity(required: u64) -> u64 {
    let cap = required.next_power_of_two().max(4096);
    cap.div_ceil(wgpu::COPY_BUFFER_ALIGNMENT) * wgpu::COPY_BUFFER_ALIGNMENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadview_geometry::{LineVertex, Vertex};

    // ── vertex layout ─────────────────────────────────────────────────────

    #[test]
    fn mesh_vertex_layout() {
        let attrs = vertex_attributes(&Vertex::ATTRIBUTES);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].shader_location, 0);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x4);
        assert_eq!(attrs[1].offset, 12);
    }

    #[test]
    fn line_vertex_layout() {
        let attrs = vertex_attributes(&LineVertex::ATTRIBUTES);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[1].offset, 8);
    }

    #[test]
    fn unknown_attribute_keeps_its_slot() {
        let table = [
            VertexAttribute { name: "pos", components: 3 },
            VertexAttribute { name: "uv", components: 2 },
            VertexAttribute { name: "col", components: 4 },
        ];
        let attrs = vertex_attributes(&table);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(attrs[1].offset, 20);
    }

    #[test]
    fn layout_stride_matches_struct_size() {
        assert_eq!(Vertex::STRIDE * 4, std::mem::size_of::<Vertex>());
        assert_eq!(LineVertex::STRIDE * 4, std::mem::size_of::<LineVertex>());
    }

    // ── buffers ───────────────────────────────────────────────────────────

    #[test]
    fn capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(1), 4096);
        assert_eq!(grown_capacity(4097), 8192);
        assert_eq!(grown_capacity(168_000), 262_144);
    }

    #[test]
    fn camera_binding_size_is_two_matrices() {
        assert_eq!(camera_ubo_min_binding_size().map(|n| n.get()), Some(128));
    }
}
