//! Screen-to-ground helpers for rectifying a rendered (or filmed) road.
//!
//! These work in image space: `x` grows right, `y` grows down, and lengths on
//! the road-cone edges are measured in screen-width units, matching
//! [`crate::overlay::tan_line_angle`].

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::camera::Camera;
use crate::overlay::tan_line_angle;

/// Stand-in radius for "straight road".
pub const RADIUS_INFINITY: i64 = 1 << 30;
/// Smallest radius in a [`road_radii`] ladder.
pub const MIN_RADIUS: i64 = 2;

/// Road trapezoid in pixel coordinates plus the height of its rectified
/// image.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StreetRect {
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corners: [Vec2; 4],
    pub target_height: u32,
}

/// Height of the rectified road image for a trapezoid whose top edge sits at
/// `y_on_screen` (fraction of the screen height, measured from the bottom).
pub fn target_height(target_width: f32, inclination: f32, fov_y: f32, y_on_screen: f32) -> f32 {
    let alpha1 = FRAC_PI_2 - inclination;
    let alpha2 = FRAC_PI_2 - ((fov_y / 2.0).tan() * (1.0 - 2.0 * y_on_screen)).atan();
    target_width * (alpha2.sin() / (PI - alpha1 - alpha2).sin() * y_on_screen)
}

/// Trapezoid bounded by the projection lines, cut at `upper_line_height`
/// (screen-width units from the left edge) or at the image top, whichever
/// comes first.
pub fn street_rect(
    camera: &Camera,
    width: u32,
    height: u32,
    upper_line_height: f32,
    target_width: u32,
) -> StreetRect {
    let screen_ratio = Camera::aspect_of(width, height);
    let slope = tan_line_angle(&Camera { aspect: screen_ratio, ..*camera });

    let top = 1.0 / screen_ratio;
    let (x, y) = if slope * upper_line_height > top {
        (top / slope, top)
    } else {
        (upper_line_height, slope * upper_line_height)
    };

    let (w, h) = (width as f32, height as f32);
    let corners = [
        Vec2::new(x * w, h - y * w),
        Vec2::new((1.0 - x) * w, h - y * w),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ];

    let rectified = target_height(
        target_width as f32,
        camera.inclination,
        camera.fov_y,
        y * screen_ratio,
    );

    StreetRect {
        corners,
        target_height: rectified.max(0.0) as u32,
    }
}

/// Width of the road strip visible at the bottom of the screen, for a camera
/// mounted `camera_height` above the ground.
pub fn projected_road_width(aspect: f32, inclination: f32, camera_height: f32, fov_y: f32) -> f32 {
    2.0 * camera_height
        * aspect
        * (FRAC_PI_2 - inclination - fov_y / 2.0).tan()
        * (fov_y / 2.0).tan()
        / inclination.cos()
}

/// Candidate curve radii, `2 * count` of them, largest positive first and
/// largest-magnitude negative last.
///
/// `r_i = trunc(multiplier * count / (i + 1))`, clamped to
/// `[MIN_RADIUS, RADIUS_INFINITY]`; negatives mirror the positives.
pub fn road_radii(count: usize, multiplier: f64) -> Vec<i64> {
    let positives: Vec<i64> = (0..count)
        .map(|i| {
            let radius = multiplier * count as f64 / (i + 1) as f64;
            (radius as i64).clamp(MIN_RADIUS, RADIUS_INFINITY)
        })
        .collect();

    positives
        .iter()
        .copied()
        .chain(positives.iter().rev().map(|r| -r))
        .collect()
}

/// Straight road first (`None`, [`RADIUS_INFINITY`]), then every radius with
/// its index.
pub fn radius_candidates(radii: &[i64]) -> impl Iterator<Item = (Option<usize>, i64)> + '_ {
    std::iter::once((None, RADIUS_INFINITY))
        .chain(radii.iter().enumerate().map(|(i, r)| (Some(i), *r)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn cam() -> Camera {
        Camera::new(10f32.to_radians(), FRAC_PI_4, 16.0 / 9.0)
    }

    // ── street_rect ───────────────────────────────────────────────────────

    #[test]
    fn rect_bottom_spans_image() {
        let rect = street_rect(&cam(), 1600, 900, 0.2, 200);
        assert_eq!(rect.corners[2], Vec2::new(1600.0, 900.0));
        assert_eq!(rect.corners[3], Vec2::new(0.0, 900.0));
    }

    #[test]
    fn rect_top_is_symmetric() {
        let rect = street_rect(&cam(), 1600, 900, 0.2, 200);
        let [tl, tr, ..] = rect.corners;
        assert_eq!(tl.y, tr.y);
        assert!((tl.x + tr.x - 1600.0).abs() < 1e-3);
    }

    #[test]
    fn rect_follows_projection_line_below_top() {
        let rect = street_rect(&cam(), 1600, 900, 0.1, 200);
        let slope = tan_line_angle(&Camera { aspect: 1600.0 / 900.0, ..cam() });
        assert!((rect.corners[0].x - 160.0).abs() < 1e-3);
        assert!((rect.corners[0].y - (900.0 - slope * 0.1 * 1600.0)).abs() < 1e-2);
    }

    #[test]
    fn rect_is_clamped_to_image_top() {
        let rect = street_rect(&cam(), 1600, 900, 10.0, 200);
        let top = 900.0 / 1600.0;
        let slope = tan_line_angle(&Camera { aspect: 1600.0 / 900.0, ..cam() });
        assert!(rect.corners[0].y.abs() < 1e-2);
        assert!((rect.corners[0].x - top / slope * 1600.0).abs() < 1e-2);
    }

    // ── target_height ─────────────────────────────────────────────────────

    #[test]
    fn target_height_is_zero_at_bottom() {
        assert!(target_height(200.0, 0.2, 0.8, 0.0).abs() < 1e-5);
    }

    #[test]
    fn target_height_grows_with_screen_height() {
        let low = target_height(200.0, 0.2, 0.8, 0.1);
        let high = target_height(200.0, 0.2, 0.8, 0.3);
        assert!(low > 0.0 && high > low);
    }

    // ── road width ────────────────────────────────────────────────────────

    #[test]
    fn road_width_scales_with_camera_height() {
        let one = projected_road_width(16.0 / 9.0, 0.2, 1.0, 0.8);
        let two = projected_road_width(16.0 / 9.0, 0.2, 2.0, 0.8);
        assert!(one > 0.0);
        assert!((two - 2.0 * one).abs() < 1e-4);
    }

    // ── radii ─────────────────────────────────────────────────────────────

    #[test]
    fn radii_are_sorted_and_mirrored() {
        let radii = road_radii(4, 10.0);
        assert_eq!(radii, vec![40, 20, 13, 10, -10, -13, -20, -40]);
    }

    #[test]
    fn radii_are_clamped() {
        let small = road_radii(3, 0.1);
        assert!(small.iter().all(|r| r.abs() == MIN_RADIUS));

        let huge = road_radii(2, 1e12);
        assert_eq!(huge[0], RADIUS_INFINITY);
        assert_eq!(huge[3], -RADIUS_INFINITY);
    }

    #[test]
    fn candidates_start_with_straight_road() {
        let radii = road_radii(2, 5.0);
        let c: Vec<_> = radius_candidates(&radii).collect();
        assert_eq!(c.len(), 5);
        assert_eq!(c[0], (None, RADIUS_INFINITY));
        assert_eq!(c[1], (Some(0), 10));
        assert_eq!(c[4], (Some(3), -10));
    }
}
