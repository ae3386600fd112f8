use bytemuck::{Pod, Zeroable};

use crate::color::ColorRgba;

/// A named, interleaved vertex attribute.
///
/// `components` counts `f32` fields. The render layer maps names to shader
/// locations; a mismatch between this table and the shader is the caller's
/// problem.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub components: u32,
}

/// Sums the component counts of an attribute table (the stride in floats).
pub const fn stride_of(attributes: &[VertexAttribute]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < attributes.len() {
        total += attributes[i].components;
        i += 1;
    }
    total
}

/// Float offset of every attribute in an interleaved record.
pub fn offsets_of(attributes: &[VertexAttribute]) -> Vec<u32> {
    attributes
        .iter()
        .scan(0, |acc, attr| {
            let offset = *acc;
            *acc += attr.components;
            Some(offset)
        })
        .collect()
}

/// Mesh vertex: world position + straight-alpha RGBA color.
///
/// Layout (28 bytes):
///
///  offset  0  pos  [f32; 3]   loc 0
///  offset 12  col  [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub col: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute { name: "pos", components: 3 },
        VertexAttribute { name: "col", components: 4 },
    ];

    /// Number of `f32` fields per vertex.
    pub const STRIDE: usize = stride_of(&Self::ATTRIBUTES) as usize;

    #[inline]
    pub fn new(pos: [f32; 3], color: ColorRgba) -> Self {
        Self { pos, col: color.to_array() }
    }

    #[inline]
    pub fn color(&self) -> ColorRgba {
        ColorRgba::from(self.col)
    }
}

/// Screen-space overlay vertex: NDC position + color.
///
/// Layout (24 bytes):
///
///  offset  0  pos  [f32; 2]   loc 0
///  offset  8  col  [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 2],
    pub col: [f32; 4],
}

impl LineVertex {
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute { name: "pos", components: 2 },
        VertexAttribute { name: "col", components: 4 },
    ];

    pub const STRIDE: usize = stride_of(&Self::ATTRIBUTES) as usize;

    #[inline]
    pub fn new(pos: [f32; 2], color: ColorRgba) -> Self {
        Self { pos, col: color.to_array() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_stride_matches_memory_layout() {
        assert_eq!(Vertex::STRIDE, 7);
        assert_eq!(std::mem::size_of::<Vertex>(), Vertex::STRIDE * 4);
    }

    #[test]
    fn line_vertex_stride_matches_memory_layout() {
        assert_eq!(LineVertex::STRIDE, 6);
        assert_eq!(std::mem::size_of::<LineVertex>(), LineVertex::STRIDE * 4);
    }

    #[test]
    fn offsets_accumulate_components() {
        assert_eq!(offsets_of(&Vertex::ATTRIBUTES), vec![0, 3]);
        assert_eq!(offsets_of(&LineVertex::ATTRIBUTES), vec![0, 2]);
    }

    #[test]
    fn rgb_only_table_has_stride_six() {
        let rgb = [
            VertexAttribute { name: "pos", components: 3 },
            VertexAttribute { name: "col", components: 3 },
        ];
        assert_eq!(stride_of(&rgb), 6);
    }
}
