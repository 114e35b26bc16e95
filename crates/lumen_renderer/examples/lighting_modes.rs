//! Render the reference scene once per lighting mode.
//!
//! Run with: cargo run --release --example lighting_modes -- [output-dir]

use std::env;
use std::path::PathBuf;

use lumen_core::Scene;
use lumen_renderer::{render, LightingMode, RenderScene, RenderSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let out_dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let scene = RenderScene::new(Scene::reference()?)?;
    let mut settings = RenderSettings {
        lighting_mode: LightingMode::ObservedArea,
        ..Default::default()
    };

    for _ in 0..4 {
        let image = render(&scene, &settings);
        let path = out_dir.join(format!("{:?}.bmp", settings.lighting_mode).to_lowercase());
        image.save_bmp(&path)?;
        println!("{:?} -> {}", settings.lighting_mode, path.display());

        settings.cycle_lighting_mode();
    }

    Ok(())
}
