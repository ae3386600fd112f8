//! Scene configuration.
//!
//! Every field has a default, so a parameters file only needs the keys it
//! changes. Angles are stored in degrees, the way people write them, and
//! converted once when the camera is built.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use roadview_engine::render::shader::bundled;
use roadview_geometry::camera::fov_y_from_fov_x;
use roadview_geometry::street::DEFAULT_RESOLUTION;
use roadview_geometry::{Camera, ColorRgba};
use serde::Deserialize;

/// Which rings the studio composes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Two large static rings, one slightly above the other.
    TwinRings,
    /// Animated street with solid lane lines.
    Street,
    /// Animated street with dashes that advance every frame.
    DashedStreet,
    /// Animated street with a per-vertex noisy roadbed.
    NoisyStreet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,

    #[serde(alias = "cameraInclination")]
    pub camera_inclination_deg: f32,
    /// Vertical field of view.
    pub fov_y_deg: f32,
    /// Horizontal field of view; replaces `fov_y_deg` when set.
    #[serde(alias = "fovx")]
    pub fov_x_deg: Option<f32>,
    /// Height of the camera above the road, in world units.
    #[serde(alias = "cameraHeight")]
    pub camera_height: f32,
    /// Where the road trapezoid is cut, in screen-width units.
    #[serde(alias = "upperRectLineHeight")]
    pub upper_rect_line_height: f32,
    /// Width in pixels of the rectified road image.
    #[serde(alias = "profileWidth")]
    pub profile_width: u32,

    pub scene: SceneKind,
    pub resolution: u32,

    pub clear_color: [f32; 3],
    pub street_color: [f32; 4],
    pub line_color: [f32; 4],

    /// Street parameter cycles per second.
    pub animation_speed: f32,
    /// Ring steps per dash (and per gap).
    pub dash_steps: u64,
    pub noise_amplitude: f32,
    pub noise_seed: u64,

    pub projection_lines: bool,
    pub projection_line_color: [f32; 4],

    /// `None` disables screenshots.
    pub screenshot_path: Option<PathBuf>,
    /// Frames between screenshots; 0 captures the first frame only.
    pub screenshot_every: u64,

    pub frame_interval_ms: u64,

    pub ring_vertex_shader: PathBuf,
    pub overlay_vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,

    pub log_filter: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            camera_inclination_deg: 5.0,
            fov_y_deg: 45.0,
            fov_x_deg: None,
            camera_height: 0.5,
            upper_rect_line_height: 0.5,
            profile_width: 256,
            scene: SceneKind::TwinRings,
            resolution: DEFAULT_RESOLUTION,
            clear_color: [0.2, 0.3, 0.3],
            street_color: [0.25, 0.25, 0.25, 1.0],
            line_color: [1.0, 1.0, 1.0, 1.0],
            animation_speed: 0.1,
            dash_steps: 10,
            noise_amplitude: 0.05,
            noise_seed: 0,
            projection_lines: true,
            projection_line_color: [1.0, 0.0, 0.0, 1.0],
            screenshot_path: Some(PathBuf::from("screenshot.png")),
            screenshot_every: 0,
            frame_interval_ms: 100,
            ring_vertex_shader: bundled("ring.vert.wgsl"),
            overlay_vertex_shader: bundled("overlay.vert.wgsl"),
            fragment_shader: bundled("color.frag.wgsl"),
            log_filter: None,
        }
    }
}

impl SceneConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read {}", path.display()));
            }
        };
        Self::from_json(&text).with_context(|| format!("invalid parameters in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.width > 0 && self.height > 0, "window size must be non-zero");
        anyhow::ensure!(
            self.fov_y_deg > 0.0 && self.fov_y_deg < 180.0,
            "fov_y_deg must be in (0, 180)"
        );
        if let Some(fov_x) = self.fov_x_deg {
            anyhow::ensure!(fov_x > 0.0 && fov_x < 180.0, "fov_x_deg must be in (0, 180)");
        }
        anyhow::ensure!(self.camera_height > 0.0, "camera_height must be positive");
        anyhow::ensure!(
            self.upper_rect_line_height > 0.0,
            "upper_rect_line_height must be positive"
        );
        anyhow::ensure!(self.profile_width > 0, "profile_width must be non-zero");
        if self.resolution < 3 {
            log::warn!("resolution {} is below 3; rings will be degenerate", self.resolution);
        }
        Ok(())
    }

    /// Vertical FOV in radians, derived from the horizontal one when given.
    pub fn fov_y(&self) -> f32 {
        match self.fov_x_deg {
            Some(fov_x) => fov_y_from_fov_x(fov_x.to_radians(), self.width, self.height),
            None => self.fov_y_deg.to_radians(),
        }
    }

    /// Camera for a drawable of `width × height` pixels.
    pub fn camera(&self, width: u32, height: u32) -> Camera {
        Camera::new(
            self.camera_inclination_deg.to_radians(),
            self.fov_y(),
            Camera::aspect_of(width, height),
        )
    }

    pub fn clear(&self) -> ColorRgba {
        ColorRgba::from(self.clear_color)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Whether frame `frame_index` (zero-based) should be captured.
    pub fn wants_screenshot(&self, frame_index: u64) -> bool {
        if self.screenshot_path.is_none() {
            return false;
        }
        match self.screenshot_every {
            0 => frame_index == 0,
            every => frame_index % every == 0,
        }
    }
}
