//! Pitch-only perspective camera.
//!
//! The camera sits at the origin looking along -Z. Its only degree of freedom
//! is the inclination (rotation about +X); there is no translation, yaw or
//! roll. Depth uses the wgpu convention: NDC z in `[0, 1]`.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Near clip plane distance.
pub const NEAR: f32 = 0.01;
/// Far clip plane distance.
pub const FAR: f32 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Pitch in radians.
    pub inclination: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height, must be > 0.
    pub aspect: f32,
}

impl Camera {
    pub fn new(inclination: f32, fov_y: f32, aspect: f32) -> Self {
        debug_assert!(aspect > 0.0, "aspect ratio must be positive");
        Self { inclination, fov_y, aspect }
    }

    /// Aspect ratio from a pixel size. Zero height yields aspect 1.
    pub fn aspect_of(width: u32, height: u32) -> f32 {
        if height == 0 { 1.0 } else { width as f32 / height as f32 }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_x(self.inclination)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, NEAR, FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Projects a world-space point to normalized device coordinates.
    pub fn project(&self, point: Vec3) -> Vec3 {
        let clip = self.view_projection() * point.extend(1.0);
        clip.truncate() / clip.w
    }

    /// Uniform block for the mesh shader.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view().to_cols_array_2d(),
            projection: self.projection().to_cols_array_2d(),
        }
    }
}

/// Converts a horizontal FOV to the matching vertical FOV for a pixel size.
pub fn fov_y_from_fov_x(fov_x: f32, width: u32, height: u32) -> f32 {
    if width == 0 {
        return fov_x;
    }
    2.0 * ((fov_x / 2.0).tan() / width as f32 * height as f32).atan()
}

/// GPU layout of the camera matrices (128 bytes, column-major).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn view(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.view)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-4;

    fn cam(inclination_deg: f32) -> Camera {
        Camera::new(inclination_deg.to_radians(), FRAC_PI_4, 16.0 / 9.0)
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn near_plane_maps_to_zero_depth() {
        let ndc = cam(0.0).project(Vec3::new(0.0, 0.0, -NEAR));
        assert!(ndc.z.abs() < EPS, "near z = {}", ndc.z);
    }

    #[test]
    fn far_plane_maps_to_unit_depth() {
        let ndc = cam(0.0).project(Vec3::new(0.0, 0.0, -FAR));
        assert!((ndc.z - 1.0).abs() < EPS, "far z = {}", ndc.z);
    }

    #[test]
    fn fov_edge_maps_to_screen_edge() {
        let c = cam(0.0);
        let z = -10.0;
        let y = (c.fov_y / 2.0).tan() * 10.0;
        let ndc = c.project(Vec3::new(0.0, y, z));
        assert!((ndc.y - 1.0).abs() < EPS);

        let x = y * c.aspect;
        let ndc = c.project(Vec3::new(x, 0.0, z));
        assert!((ndc.x - 1.0).abs() < EPS);
    }

    // ── view ──────────────────────────────────────────────────────────────

    #[test]
    fn zero_inclination_view_is_identity() {
        assert_eq!(cam(0.0).view(), Mat4::IDENTITY);
    }

    #[test]
    fn view_has_no_translation() {
        let v = cam(30.0).view();
        assert_eq!(v.w_axis, Vec4::W);
        assert_eq!(v.transform_point3(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn view_rotates_about_x_only() {
        let v = cam(90.0).view();
        let forward = v.transform_vector3(Vec3::new(0.0, 0.0, -1.0));
        assert!((forward - Vec3::Y).length() < EPS);
        let right = v.transform_vector3(Vec3::X);
        assert!((right - Vec3::X).length() < EPS);
    }

    #[test]
    fn inclination_raises_ground_ahead() {
        // Ground point far ahead, below the camera.
        let p = Vec3::new(0.0, -0.5, -50.0);
        assert!(cam(5.0).project(p).y > cam(0.0).project(p).y);
    }

    #[test]
    fn uniform_round_trips_matrices() {
        let c = cam(12.0);
        let u = c.uniform();
        assert_eq!(u.view(), c.view());
        assert_eq!(u.projection(), c.projection());
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
    }

    #[test]
    fn clip_w_is_view_depth() {
        let clip = cam(0.0).view_projection() * Vec3::new(0.0, 0.0, -3.0).extend(1.0);
        assert!((clip.w - 3.0).abs() < EPS);
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn fov_y_from_square_viewport_is_unchanged() {
        assert!((fov_y_from_fov_x(1.0, 500, 500) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fov_y_narrower_on_wide_viewport() {
        let fov_y = fov_y_from_fov_x(FRAC_PI_2, 1600, 900);
        assert!(fov_y < FRAC_PI_2);
        assert!(((fov_y / 2.0).tan() - 900.0 / 1600.0).abs() < 1e-5);
    }

    #[test]
    fn aspect_of_handles_zero_height() {
        assert_eq!(Camera::aspect_of(1600, 900), 1600.0 / 900.0);
        assert_eq!(Camera::aspect_of(10, 0), 1.0);
    }
}
