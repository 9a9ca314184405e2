use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scenes that ship with the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Builtin {
    /// Ground, diffuse, hollow glass and metal spheres
    Demo,
    /// The random spheres cover scene
    Random,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "A path tracer for sphere scenes")]
pub struct Args {
    /// Scene description (JSON); overrides --builtin
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no --scene is given
    #[arg(long, value_enum, default_value = "random")]
    pub builtin: Builtin,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Width / height; defaults to the scene camera's aspect ratio
    #[arg(long)]
    pub aspect_ratio: Option<f32>,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100")]
    pub samples: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value = "50")]
    pub max_depth: u32,

    /// Number of tiles (worker threads); defaults to the available cores
    #[arg(long)]
    pub tiles: Option<usize>,

    /// Seed for sampling and for the random scene
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Render on the calling thread only
    #[arg(long)]
    pub single_threaded: bool,

    /// Output file path (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Also write the scene that was rendered as JSON
    #[arg(long)]
    pub export_scene: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
