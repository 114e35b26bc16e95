use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::LightingMode;

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

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Spheres, triangles and lights in a box
    Reference,
    /// An OBJ mesh in the same box
    Bunny,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    ObservedArea,
    Radiance,
    Brdf,
    Combined,
}

impl From<Mode> for LightingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::ObservedArea => LightingMode::ObservedArea,
            Mode::Radiance => LightingMode::Radiance,
            Mode::Brdf => LightingMode::Brdf,
            Mode::Combined => LightingMode::Combined,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a Lumen scene to a BMP image")]
pub struct Args {
    /// Scene to render
    #[arg(value_enum, default_value = "reference")]
    pub scene: SceneKind,

    /// OBJ file for the bunny scene
    #[arg(long, required_if_eq("scene", "bunny"))]
    pub obj: Option<PathBuf>,

    /// JSON file with render settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Disable shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Lighting mode
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Camera pitch in degrees, positive looks down
    #[arg(long, allow_negative_numbers = true)]
    pub pitch: Option<f32>,

    /// Camera yaw in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub yaw: Option<f32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Build a BVH for every mesh
    #[arg(long)]
    pub bvh: bool,

    /// Output BMP path
    #[arg(short, long, default_value = "output.bmp")]
    pub output: PathBuf,

    /// Print the effective render settings as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
