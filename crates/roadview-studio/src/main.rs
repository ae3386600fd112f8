//! roadview: a street of rings seen from a pitched camera.

mod app;
mod cli;
mod config;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::PhysicalSize;

use roadview_engine::device::GpuInit;
use roadview_engine::logging::{init_logging, LoggingConfig};
use roadview_engine::render::ShaderPair;
use roadview_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;
use crate::cli::Cli;
use crate::config::SceneConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SceneConfig::load(&cli.params)?;
    if let Some(scene) = cli.scene {
        config.scene = scene;
    }
    if let Some(path) = cli.screenshot {
        config.screenshot_path = Some(path);
    }

    init_logging(LoggingConfig {
        env_filter: cli.log.or_else(|| config.log_filter.clone()),
        ..LoggingConfig::default()
    });
    if cli.params.exists() {
        log::info!("parameters from {}", cli.params.display());
    }
    log::info!(
        "scene {:?}, {}x{}, inclination {}°",
        config.scene,
        config.width,
        config.height,
        config.camera_inclination_deg
    );

    let ring_shaders = load_shaders(&config.ring_vertex_shader, &config.fragment_shader)?;
    let overlay_shaders = load_shaders(&config.overlay_vertex_shader, &config.fragment_shader)?;

    let runtime = RuntimeConfig {
        title: "roadview".to_string(),
        initial_size: PhysicalSize::new(config.width, config.height),
        frame_interval: config.frame_interval(),
        ..RuntimeConfig::default()
    };

    let app = StudioApp::new(config, ring_shaders, overlay_shaders);
    Runtime::run(runtime, GpuInit::default(), app)
}

fn load_shaders(vertex: &std::path::Path, fragment: &std::path::Path) -> Result<ShaderPair> {
    ShaderPair::load(vertex, fragment)
        .inspect_err(|e| log::error!("{e}"))
        .context("shader setup failed")
}
