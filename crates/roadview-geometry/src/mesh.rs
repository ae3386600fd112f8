use crate::vertex::Vertex;

/// Triangle list: every consecutive vertex triple is one triangle.
///
/// Insertion order is draw order. Nothing sorts by depth, so overlapping
/// translucent rings blend in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self { vertices: Vec::with_capacity(vertices) }
    }

    /// Appends one triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        self.vertices.extend([a, b, c]);
    }

    /// Appends all of `other` after the current vertices.
    pub fn append(&mut self, other: &Mesh) {
        self.vertices.extend_from_slice(&other.vertices);
    }

    /// Concatenates meshes in iteration order.
    pub fn merge<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        let mut out = Mesh::new();
        for mesh in meshes {
            out.append(mesh);
        }
        out
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Interleaved float stream, `Vertex::STRIDE` floats per vertex.
    pub fn to_flat(&self) -> Vec<f32> {
        bytemuck::cast_slice::<Vertex, f32>(&self.vertices).to_vec()
    }

    /// Raw bytes ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl FromIterator<Vertex> for Mesh {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self { vertices: iter.into_iter().collect() }
    }
}

impl Extend<Vertex> for Mesh {
    fn extend<I: IntoIterator<Item = Vertex>>(&mut self, iter: I) {
        self.vertices.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRgba;

    fn v(x: f32) -> Vertex {
        Vertex::new([x, 0.0, 0.0], ColorRgba::white())
    }

    fn tri(x: f32) -> Mesh {
        let mut m = Mesh::new();
        m.push_triangle(v(x), v(x + 1.0), v(x + 2.0));
        m
    }

    #[test]
    fn merge_preserves_order() {
        let merged = Mesh::merge([&tri(0.0), &tri(10.0)]);
        assert_eq!(merged.len(), 6);
        assert_eq!(merged.triangle_count(), 2);
        assert_eq!(merged.vertices()[3].pos[0], 10.0);
    }

    #[test]
    fn flat_form_uses_stride() {
        let flat = tri(0.0).to_flat();
        assert_eq!(flat.len(), 3 * Vertex::STRIDE);
        // second vertex x coordinate
        assert_eq!(flat[Vertex::STRIDE], 1.0);
        // first vertex alpha
        assert_eq!(flat[6], 1.0);
    }

    #[test]
    fn bytes_cover_every_vertex() {
        assert_eq!(tri(0.0).as_bytes().len(), 3 * std::mem::size_of::<Vertex>());
    }

    #[test]
    fn empty_merge_is_empty() {
        assert!(Mesh::merge(std::iter::empty()).is_empty());
    }
}
