//! Scene composition.
//!
//! Turns a [`SceneConfig`] plus the current frame into one merged mesh.

use std::f32::consts::TAU;

use roadview_geometry::palette::{solid, DashPattern, NoiseColor};
use roadview_geometry::{annulus, ColorRgba, Mesh, Street};

use crate::config::{SceneConfig, SceneKind};

/// Street parameter at `elapsed` seconds: a sine sweep over [-1, 1].
///
/// Crossing zero sends the road to the horizon and brings it back on the
/// other side.
pub fn street_param(elapsed: f64, cycles_per_second: f32) -> f32 {
    (TAU * (elapsed as f32) * cycles_per_second).sin()
}

pub struct Scene {
    kind: SceneKind,
    street: Street,
    street_color: ColorRgba,
    line_color: ColorRgba,
    animation_speed: f32,
    dashes: DashPattern,
    noise_amplitude: f32,
    noise_seed: u64,

    /// Static scenes are built once.
    cached: Option<Mesh>,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let line_color = ColorRgba::from(config.line_color);
        Self {
            kind: config.scene,
            street: Street::new(config.resolution),
            street_color: ColorRgba::from(config.street_color),
            line_color,
            animation_speed: config.animation_speed,
            dashes: DashPattern::new(line_color, config.dash_steps),
            noise_amplitude: config.noise_amplitude,
            noise_seed: config.noise_seed,
            cached: None,
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    /// Whether the mesh changes from frame to frame.
    pub fn is_animated(&self) -> bool {
        self.kind != SceneKind::TwinRings
    }

    /// Mesh for frame `frame_index` at `elapsed` seconds.
    pub fn build(&mut self, elapsed: f64, frame_index: u64) -> Mesh {
        let param = street_param(elapsed, self.animation_speed);

        match self.kind {
            SceneKind::TwinRings => self.cached.get_or_insert_with(twin_rings).clone(),
            SceneKind::Street => {
                self.street.build(param, solid(self.street_color), solid(self.line_color))
            }
            SceneKind::DashedStreet => {
                // One ring step per frame, so the dashes crawl toward the camera.
                self.dashes.reset(frame_index);
                self.street.build(param, solid(self.street_color), self.dashes.generator())
            }
            SceneKind::NoisyStreet => {
                // Same seed every frame keeps the grain still on the road.
                let mut noise = NoiseColor::new(self.street_color, self.noise_amplitude, self.noise_seed);
                self.street.build(param, noise.generator(), solid(self.line_color))
            }
        }
    }
}

/// Two wide rings just below the camera: violet, with a thicker orange one
/// a little above it.
pub fn twin_rings() -> Mesh {
    let violet = annulus([-100.0, -0.5, 0.0], 99.9, 100.1, 1000, solid(ColorRgba::rgb(0.5, 0.0, 1.0)));
    let orange = annulus([-100.0, -0.4, 0.0], 99.8, 100.2, 1000, solid(ColorRgba::rgb(1.0, 0.5, 0.0)));
    Mesh::merge([&violet, &orange])
}
