use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use neighborhood::{config::ViewerConfig, NeighborhoodApp};

#[derive(Parser, Debug)]
#[command(name = "neighborhood")]
#[command(about = "Walk around a small 3D neighborhood")]
struct Cli {
    /// RON file with viewer settings
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory textures, models and skybox faces are read from
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Start with the HUD hidden (F1 toggles it)
    #[arg(long)]
    no_hud: bool,

    /// Sync presentation to the display refresh rate
    #[arg(long)]
    vsync: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = ViewerConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load viewer config")?;
    if let Some(root) = cli.assets {
        config.assets.root = root;
    }
    if cli.no_hud {
        config.hud.visible = false;
    }
    if cli.vsync {
        config.window.vsync = true;
    }
    config.validate()?;

    NeighborhoodApp::new(config).run()
}
