use std::path::PathBuf;

use clap::Parser;

use crate::config::SceneKind;

#[derive(Parser, Debug)]
#[command(name = "roadview")]
#[command(about = "Renders a procedural street in perspective and dumps frames to PNG")]
pub struct Cli {
    /// JSON parameters file; a missing file means defaults
    #[arg(long, short, default_value = "params.json")]
    pub params: PathBuf,

    /// Scene to show, overriding the parameters file
    #[arg(long, short, value_enum)]
    pub scene: Option<SceneKind>,

    /// Screenshot destination, overriding the parameters file
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Log filter in env_logger syntax (e.g. "debug" or "roadview_engine=trace")
    #[arg(long)]
    pub log: Option<String>,
}
