//! Projection-line overlay.
//!
//! Two screen-space segments rising from the bottom corners toward the
//! vanishing point. They mark the edges of the projected road cone for a
//! given camera and are purely diagnostic.

use glam::Vec2;

use crate::camera::Camera;
use crate::color::ColorRgba;
use crate::vertex::LineVertex;

/// Segment in normalized device coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Slope of the cone edges, in screen-width units.
pub fn tan_line_angle(camera: &Camera) -> f32 {
    (camera.inclination.tan() / (camera.fov_y / 2.0).tan() + 1.0) / camera.aspect
}

/// Left and right cone edges, bottom corner first.
pub fn projection_lines(camera: &Camera) -> [LineSegment; 2] {
    let offset = 2.0 / tan_line_angle(camera) / camera.aspect;
    [
        LineSegment {
            from: Vec2::new(-1.0, -1.0),
            to: Vec2::new(-1.0 + offset, 1.0),
        },
        LineSegment {
            from: Vec2::new(1.0, -1.0),
            to: Vec2::new(1.0 - offset, 1.0),
        },
    ]
}

/// Line-list vertices for the overlay renderer.
pub fn projection_line_vertices(camera: &Camera, color: ColorRgba) -> Vec<LineVertex> {
    projection_lines(camera)
        .iter()
        .flat_map(|s| [LineVertex::new(s.from.into(), color), LineVertex::new(s.to.into(), color)])
        .collect()
}
