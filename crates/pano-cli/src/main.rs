//! pano - equirectangular panorama reprojection CLI
//!
//! Turns 360° equirectangular panoramas into cube faces or pinhole views.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use config::{Config, ViewConfig};

#[derive(Parser)]
#[command(name = "pano")]
#[command(author, version, about = "Equirectangular panorama reprojection")]
#[command(long_about = "
Reprojects 360° equirectangular panoramas into cube faces or
pinhole-camera views. Inputs may be files, directories or glob patterns.

Examples:
  pano cubemap pano.jpg -o faces/                  # six faces, mirrored
  pano cubemap 'shots/*.jpg' -o faces/ --scale 1   # smaller faces
  pano perspective pano.jpg -o views/              # front/right/back/left
  pano perspective shots/ -o views/ --view up=0,45 --fov-h 90 --fov-v 90
  pano -v -j 4 --config pano.yaml cubemap shots/ -o faces/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML config file with defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split panoramas into six cube faces
    #[command(visible_alias = "cube")]
    Cubemap(CubemapArgs),

    /// Render pinhole-camera views from panoramas
    #[command(visible_alias = "persp")]
    Perspective(PerspectiveArgs),
}

#[derive(Args)]
struct CubemapArgs {
    /// Input panoramas (files, directories or glob patterns)
    #[arg(required = true)]
    input: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Face size as a multiple of half the shorter source side
    #[arg(short, long)]
    scale: Option<f64>,

    /// Explicit face size in pixels (overrides --scale)
    #[arg(long)]
    face_size: Option<u32>,

    /// Write faces without horizontal mirroring
    #[arg(long)]
    no_mirror: bool,

    /// Largest allowed source dimension
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Output file extension (jpg, png)
    #[arg(short, long)]
    format: Option<String>,
}

#[derive(Args)]
struct PerspectiveArgs {
    /// Input panoramas (files, directories or glob patterns)
    #[arg(required = true)]
    input: Vec<String>,

    /// Output directory (one sub-directory per view)
    #[arg(short, long)]
    output: PathBuf,

    /// Horizontal field of view in degrees
    #[arg(long)]
    fov_h: Option<f64>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov_v: Option<f64>,

    /// Output width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// View as name=heading[,pitch] in degrees (repeatable)
    #[arg(long = "view", value_parser = config::parse_view)]
    views: Vec<ViewConfig>,

    /// Largest allowed source dimension
    #[arg(long)]
    max_dimension: Option<u32>,

    /// Output file extension (jpg, png)
    #[arg(short, long)]
    format: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Cubemap(args) => commands::cubemap::run(args, &config, cli.verbose),
        Commands::Perspective(args) => commands::perspective::run(args, &config, cli.verbose),
    }
}
