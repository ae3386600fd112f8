use roadview_engine::core::{App, AppControl, FrameCtx};
use roadview_engine::render::{LineRenderer, MeshRenderer, ShaderPair};
use roadview_geometry::overlay::projection_line_vertices;
use roadview_geometry::perspective::{
    projected_road_width, radius_candidates, road_radii, street_rect,
};
use roadview_geometry::{Camera, ColorRgba};

use crate::config::SceneConfig;
use crate::scene::Scene;

/// Half the number of curve radii matched against a rectified road.
const RADIUS_COUNT: usize = 100;

pub struct StudioApp {
    config: SceneConfig,
    scene: Scene,
    meshes: MeshRenderer,
    lines: LineRenderer,
    mesh_ready: bool,
}

impl StudioApp {
    pub fn new(config: SceneConfig, ring_shaders: ShaderPair, overlay_shaders: ShaderPair) -> Self {
        let scene = Scene::new(&config);
        Self {
            config,
            scene,
            meshes: MeshRenderer::new(ring_shaders),
            lines: LineRenderer::new(overlay_shaders),
            mesh_ready: false,
        }
    }

    fn log_road_geometry(&self, camera: &Camera, width: u32, height: u32) {
        let cfg = &self.config;
        let rect = street_rect(camera, width, height, cfg.upper_rect_line_height, cfg.profile_width);
        log::debug!(
            "road trapezoid {:?}, rectified height {}",
            rect.corners,
            rect.target_height
        );

        let road_width =
            projected_road_width(camera.aspect, camera.inclination, cfg.camera_height, camera.fov_y);
        log::debug!("road width at the bottom edge: {road_width:.3}");

        let radii = radius_ladder(cfg.profile_width, road_width);
        log::debug!(
            "{} radius candidates, {:?} to {:?}",
            radii.len() + 1,
            radii.first(),
            radii.last()
        );
        for (index, radius) in radius_candidates(&radii) {
            log::trace!("radius candidate {index:?}: {radius}");
        }
    }

    fn screenshot(&mut self, ctx: &mut FrameCtx<'_, '_>, clear: ColorRgba, camera: Camera) {
        let Some(path) = self.config.screenshot_path.clone() else { return };
        let show_lines = self.config.projection_lines;
        let (meshes, lines) = (&mut self.meshes, &mut self.lines);

        let result = ctx
            .capture(clear, camera, |rctx, target| {
                meshes.render(rctx, target);
                if show_lines {
                    lines.render(rctx, target);
                }
            })
            .and_then(|frame| frame.write_png(&path));

        if let Err(e) = result {
            log::warn!("screenshot failed: {e}");
        }
    }
}

/// Curve radii in rectified pixels for a road `road_width` units wide.
fn radius_ladder(profile_width: u32, road_width: f32) -> Vec<i64> {
    road_radii(RADIUS_COUNT, f64::from(profile_width) / f64::from(road_width))
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (width, height) = ctx.window.size();
        let camera = self.config.camera(width, height);
        let clear = self.config.clear();
        let frame_index = ctx.time.frame_index;

        if frame_index == 0 {
            ctx.runtime.set_title(format!("roadview: {:?}", self.scene.kind()));
            self.log_road_geometry(&camera, width, height);
        }

        if self.scene.is_animated() || !self.mesh_ready {
            let mesh = self.scene.build(ctx.time.elapsed, frame_index);
            log::trace!("frame {frame_index}: {} triangles", mesh.triangle_count());
            self.meshes.set_mesh(&mesh);
            self.mesh_ready = true;
        }

        let show_lines = self.config.projection_lines;
        if show_lines {
            let color = ColorRgba::from(self.config.projection_line_color);
            self.lines.set_lines(&projection_line_vertices(&camera, color));
        }

        let (meshes, lines) = (&mut self.meshes, &mut self.lines);
        let control = ctx.render(clear, camera, |rctx, target| {
            meshes.render(rctx, target);
            if show_lines {
                lines.render(rctx, target);
            }
        });

        if control == AppControl::Continue && self.config.wants_screenshot(frame_index) {
            self.screenshot(ctx, clear, camera);
        }

        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_ladder_scales_with_profile_width() {
        let narrow = radius_ladder(100, 2.0);
        let wide = radius_ladder(200, 2.0);
        assert_eq!(narrow.len(), 2 * RADIUS_COUNT);
        assert_eq!(narrow[0], 5000);
        assert_eq!(wide[0], 10_000);
        assert_eq!(wide[wide.len() - 1], -10_000);
    }

    #[test]
    fn road_geometry_uses_configured_camera_height() {
        let config = SceneConfig::from_json(
            r#"{ "cameraInclination": 10.0, "cameraHeight": 1.0, "profileWidth": 64 }"#,
        )
        .unwrap();
        let camera = config.camera(1600, 900);
        let road_width =
            projected_road_width(camera.aspect, camera.inclination, config.camera_height, camera.fov_y);
        let doubled = projected_road_width(camera.aspect, camera.inclination, 2.0, camera.fov_y);
        assert!(road_width > 0.0);
        assert!((doubled - 2.0 * road_width).abs() < 1e-4);
        assert_eq!(radius_ladder(config.profile_width, road_width).len(), 2 * RADIUS_COUNT);
    }
}
