use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cel_shading::prelude::*;
use crystal::prelude::*;
use log::{info, warn};
use structopt::StructOpt;

const DEFAULT_CONFIG: &str = "cel_shading.toml";

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "cel_shading")]
struct CliArgs {
    /// OBJ model to render, overrides `model` from the config
    #[structopt(parse(from_os_str))]
    model: Option<PathBuf>,
    /// Config file (defaults to `cel_shading.toml` when present)
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    /// Directory to write rendered frames to as PNG
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Number of frames to render
    #[structopt(short = "f", long = "frames")]
    frames: Option<u32>,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    let config = load_config(&args)?;

    // the mesh has to load before any surface exists
    let mesh = obj::load_with_policy(&config.model, config.loader.face_policy)
        .with_context(|| format!("Failed to load model {}", config.model.display()))?;

    let mut ctx = SoftwareContext::from_config(&config).context("Failed to create render surface")?;
    info!(
        "{}: {}x{}, {} frame(s)",
        config.window.title, config.window.width, config.window.height, config.output.frames
    );
    if config.output.directory.is_none() {
        warn!("No output directory set, frames are rendered but not saved");
    }

    let renderer = Renderer::from_config(&config);
    let mut camera = Camera::from_config(&config.camera, config.aspect());
    let mut game_loop = GameLoop::new(config.camera.orbit_deg_per_frame.deg());

    game_loop
        .run(&mut ctx, &renderer, &mesh, &mut camera)
        .context("Rendering failed")?;

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => read_config(Path::new(DEFAULT_CONFIG))?,
        None => Config::default(),
    };

    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(output) = &args.output {
        config.output.directory = Some(output.clone());
    }
    if let Some(frames) = args.frames {
        config.output.frames = frames;
    }

    config.validate().context("Invalid command line arguments")?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    info!("Reading config {}", path.display());
    Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))
}
