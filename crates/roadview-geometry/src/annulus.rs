//! Ring ("annulus") mesh generation.
//!
//! A ring is a flat ribbon between two concentric circles lying in the X-Z
//! plane at a fixed height. The full turn is split into `resolution` equal
//! steps and every step contributes two triangles:
//!
//! ```text
//!   outer a1 ───── outer a2
//!      │  ╲           │
//!      │    ╲    2    │
//!      │  1   ╲       │
//!   inner a1 ───── inner a2
//! ```
//!
//! Triangle 1 is (inner a1, inner a2, outer a1), triangle 2 is
//! (inner a2, outer a1, outer a2).

use std::f32::consts::TAU;

use glam::Vec3;

use crate::color::ColorRgba;
use crate::mesh::Mesh;
use crate::vertex::Vertex;

/// Vertices emitted per angular step.
pub const VERTICES_PER_STEP: usize = 6;

/// Ring description, independent of coloring.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ring {
    pub center: Vec3,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Number of angular steps. Values below 3 are not rejected; they yield a
    /// degenerate ribbon.
    pub resolution: u32,
}

impl Ring {
    pub const fn new(center: Vec3, inner_radius: f32, outer_radius: f32, resolution: u32) -> Self {
        Self { center, inner_radius, outer_radius, resolution }
    }

    /// Number of vertices [`Ring::build`] will emit.
    pub fn vertex_count(&self) -> usize {
        VERTICES_PER_STEP * self.resolution as usize
    }

    /// Angle of step boundary `v`.
    #[inline]
    pub fn angle(&self, v: u32) -> f32 {
        TAU * v as f32 / self.resolution as f32
    }

    /// Point on the circle of `radius` at `angle`.
    #[inline]
    pub fn point(&self, radius: f32, angle: f32) -> [f32; 3] {
        [
            self.center.x + radius * angle.cos(),
            self.center.y,
            self.center.z + radius * angle.sin(),
        ]
    }

    /// Triangulates the ring.
    ///
    /// `color` is called exactly once per emitted vertex, in emission order,
    /// so stateful generators (dash patterns, noise) see a stable sequence.
    pub fn build<F>(&self, mut color: F) -> Mesh
    where
        F: FnMut() -> ColorRgba,
    {
        if self.resolution < 3 {
            log::debug!("ring resolution {} < 3 yields a degenerate mesh", self.resolution);
        }

        let mut mesh = Mesh::with_capacity(self.vertex_count());
        let (inner, outer) = (self.inner_radius, self.outer_radius);

        for v in 0..self.resolution {
            let a1 = self.angle(v);
            let a2 = self.angle(v + 1);

            let mut vertex = |radius: f32, angle: f32| Vertex::new(self.point(radius, angle), color());

            let t1 = [vertex(inner, a1), vertex(inner, a2), vertex(outer, a1)];
            mesh.push_triangle(t1[0], t1[1], t1[2]);

            let t2 = [vertex(inner, a2), vertex(outer, a1), vertex(outer, a2)];
            mesh.push_triangle(t2[0], t2[1], t2[2]);
        }

        mesh
    }
}

/// Builds a ring from loose parameters.
pub fn annulus<F>(
    center: impl Into<Vec3>,
    inner_radius: f32,
    outer_radius: f32,
    resolution: u32,
    color: F,
) -> Mesh
where
    F: FnMut() -> ColorRgba,
{
    Ring::new(center.into(), inner_radius, outer_radius, resolution).build(color)
}
