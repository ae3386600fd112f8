//! Street parameterization.
//!
//! A street is one roadbed ring plus three painted lane rings sharing a
//! center. The center sits `d` units to the side of the camera so the road
//! passes underneath it and curves away toward the vanishing point; `d`
//! comes from an eased animation parameter.
//!
//! Lane rings sit at fixed screen-side offsets from the road axis:
//! the right edge line at +4.5 and two dividers at +1.5 and -1.5, each
//! 0.2 wide. The offsets are applied with the curve direction so the edge
//! line stays on the right whichever way the road bends.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::annulus::Ring;
use crate::color::ColorRgba;
use crate::mesh::Mesh;

/// Height of the road surface below the camera.
pub const STREET_HEIGHT: f32 = -0.5;
/// Half-width of the roadbed.
pub const ROADBED_HALF_WIDTH: f32 = 4.6;
/// `(near, far)` lateral offsets of every lane ring, in draw order.
pub const LANE_OFFSETS: [(f32, f32); 3] = [(4.4, 4.6), (1.4, 1.6), (-1.4, -1.6)];
/// Lower bound applied to `|param|` before easing.
pub const MIN_PARAM: f32 = 0.01;
/// Default angular resolution for street rings.
pub const DEFAULT_RESOLUTION: u32 = 1000;

/// Eased distance from the camera to the ring center.
///
/// `d = 10·tan(π/2 − p²·π/2)` with `p = clamp(|param|, 0.01, 1)`. Small
/// parameters push the center far away (nearly straight road), `±1` brings it
/// to the camera.
pub fn street_distance(param: f32) -> f32 {
    let p = param.abs().clamp(MIN_PARAM, 1.0);
    10.0 * (FRAC_PI_2 - p * p * FRAC_PI_2).tan()
}

/// `+1` for a road bending left (center on the -X side), `-1` for right.
///
/// Zero (of either sign) bends left.
pub fn street_side(param: f32) -> f32 {
    if param < 0.0 { -1.0 } else { 1.0 }
}

/// Ring layout for one street parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StreetLayout {
    pub distance: f32,
    pub side: f32,
    pub roadbed: Ring,
    pub lanes: [Ring; 3],
}

/// Street builder.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Street {
    pub resolution: u32,
    pub height: f32,
}

impl Default for Street {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            height: STREET_HEIGHT,
        }
    }
}

impl Street {
    pub fn new(resolution: u32) -> Self {
        Self { resolution, ..Self::default() }
    }

    /// Computes ring placement without generating geometry.
    pub fn layout(&self, param: f32) -> StreetLayout {
        let distance = street_distance(param);
        let side = street_side(param);
        let center = Vec3::new(-side * distance, self.height, 0.0);

        let ring = |a: f32, b: f32| Ring::new(center, a.min(b), a.max(b), self.resolution);

        StreetLayout {
            distance,
            side,
            roadbed: ring(distance - ROADBED_HALF_WIDTH, distance + ROADBED_HALF_WIDTH),
            lanes: LANE_OFFSETS.map(|(near, far)| {
                ring(distance + side * near, distance + side * far)
            }),
        }
    }

    /// Builds the merged street mesh: roadbed first, lane rings on top.
    ///
    /// `line_color` feeds all three lane rings in sequence, so a dash pattern
    /// keeps counting across them.
    pub fn build<S, L>(&self, param: f32, street_color: S, mut line_color: L) -> Mesh
    where
        S: FnMut() -> ColorRgba,
        L: FnMut() -> ColorRgba,
    {
        let layout = self.layout(param);
        log::trace!(
            "street param {param:.3}: distance {:.3}, side {}",
            layout.distance,
            layout.side
        );

        let mut mesh = layout.roadbed.build(street_color);
        for lane in &layout.lanes {
            mesh.append(&lane.build(&mut line_color));
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::solid;

    const ROAD: ColorRgba = ColorRgba::rgb(0.2, 0.2, 0.2);
    const PAINT: ColorRgba = ColorRgba::white();

    /// True if some vertex lies on the camera's lateral axis (z ≈ 0) at `x`.
    fn crosses_at(mesh: &Mesh, range: std::ops::Range<usize>, x: f32) -> bool {
        mesh.vertices()[range]
            .iter()
            .any(|v| v.pos[2].abs() < 1e-2 && (v.pos[0] - x).abs() < 1e-2)
    }

    // ── easing ────────────────────────────────────────────────────────────

    #[test]
    fn distance_is_finite_near_zero() {
        for p in [0.0, -0.0, 0.001, -0.001] {
            let d = street_distance(p);
            assert!(d.is_finite() && d > 0.0, "param {p} -> {d}");
        }
    }

    #[test]
    fn tiny_params_clamp_to_same_distance() {
        let d = street_distance(0.0);
        assert_eq!(street_distance(0.001), d);
        assert_eq!(street_distance(-0.001), d);
        assert_eq!(street_distance(MIN_PARAM), d);
    }

    #[test]
    fn unit_param_brings_road_to_camera() {
        assert!(street_distance(1.0).abs() < 1e-5);
        assert!(street_distance(-1.0).abs() < 1e-5);
    }

    #[test]
    fn distance_shrinks_with_magnitude() {
        let ds: Vec<f32> = [0.1, 0.3, 0.5, 0.7, 0.9].iter().map(|p| street_distance(*p)).collect();
        assert!(ds.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn distance_ignores_sign() {
        assert_eq!(street_distance(0.4), street_distance(-0.4));
    }

    #[test]
    fn half_param_matches_closed_form() {
        let expected = 10.0 * (3.0 * std::f32::consts::PI / 8.0).tan();
        assert!((street_distance(0.5) - expected).abs() < 1e-3);
    }

    #[test]
    fn side_follows_sign() {
        assert_eq!(street_side(0.5), 1.0);
        assert_eq!(street_side(-0.5), -1.0);
        assert_eq!(street_side(0.0), 1.0);
        assert_eq!(street_side(-0.0), 1.0);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_mirrors_center() {
        let street = Street::new(16);
        let left = street.layout(0.5);
        let right = street.layout(-0.5);
        assert_eq!(left.roadbed.center.x, -right.roadbed.center.x);
        assert!(left.roadbed.center.x < 0.0);
        assert_eq!(left.roadbed.center.y, STREET_HEIGHT);
    }

    #[test]
    fn layout_rings_are_ordered() {
        for p in [0.2, -0.2, 0.95, -0.95] {
            let layout = Street::new(16).layout(p);
            for ring in std::iter::once(&layout.roadbed).chain(&layout.lanes) {
                assert!(ring.inner_radius < ring.outer_radius);
                assert!((ring.outer_radius - ring.inner_radius - 0.2).abs() < 1e-3 || ring == &layout.roadbed);
            }
        }
    }

    // ── mesh ──────────────────────────────────────────────────────────────

    #[test]
    fn mesh_has_four_rings() {
        let mesh = Street::new(32).build(0.3, solid(ROAD), solid(PAINT));
        assert_eq!(mesh.len(), 4 * 6 * 32);
    }

    #[test]
    fn roadbed_drawn_before_lanes() {
        let res = 32;
        let mesh = Street::new(res).build(0.3, solid(ROAD), solid(PAINT));
        let ring_len = 6 * res as usize;
        assert!(mesh.vertices()[..ring_len].iter().all(|v| v.color() == ROAD));
        assert!(mesh.vertices()[ring_len..].iter().all(|v| v.color() == PAINT));
    }

    #[test]
    fn edge_line_stays_on_the_right() {
        let res = 1000;
        let ring_len = 6 * res as usize;
        for p in [0.5, -0.5] {
            let mesh = Street::new(res).build(p, solid(ROAD), solid(PAINT));
            let edge = ring_len..2 * ring_len;
            assert!(crosses_at(&mesh, edge.clone(), 4.4), "param {p}");
            assert!(crosses_at(&mesh, edge, 4.6), "param {p}");
        }
    }

    #[test]
    fn dividers_straddle_the_axis() {
        let res = 1000;
        let ring_len = 6 * res as usize;
        let mesh = Street::new(res).build(0.5, solid(ROAD), solid(PAINT));
        assert!(crosses_at(&mesh, 2 * ring_len..3 * ring_len, 1.5 - 0.1));
        assert!(crosses_at(&mesh, 3 * ring_len..4 * ring_len, -1.5 + 0.1));
    }

    #[test]
    fn line_color_counts_across_lanes() {
        let res = 8;
        let mut calls = 0usize;
        let _ = Street::new(res).build(0.5, solid(ROAD), || {
            calls += 1;
            PAINT
        });
        assert_eq!(calls, 3 * 6 * res as usize);
    }
}
