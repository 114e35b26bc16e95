mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::{load_obj, Scene};
use lumen_renderer::{render, RenderScene, RenderSettings};

use cli::{Args, SceneKind};

/// Settings from the optional JSON file with command line overrides applied.
fn load_settings(args: &Args) -> Result<RenderSettings> {
    let mut settings = match &args.config {
        Some(path) => read_settings(path)?,
        None => RenderSettings::default(),
    };

    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if args.no_shadows {
        settings.shadows_enabled = false;
    }
    if let Some(mode) = args.mode {
        settings.lighting_mode = mode.into();
    }

    Ok(settings)
}

fn read_settings(path: &Path) -> Result<RenderSettings> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid render settings in {}", path.display()))
}

fn build_scene(args: &Args) -> Result<Scene> {
    let mut scene = match args.scene {
        SceneKind::Reference => Scene::reference().context("Failed to build reference scene")?,
        SceneKind::Bunny => {
            let path = args.obj.as_deref().context("--obj <path> is required for the bunny scene")?;
            let mesh = load_obj(path).with_context(|| format!("Failed to load {}", path.display()))?;
            Scene::bunny(mesh).context("Failed to build bunny scene")?
        }
    };

    if args.bvh {
        for mesh in &mut scene.meshes {
            mesh.use_bvh = true;
        }
    }

    let camera = &mut scene.camera;
    if args.pitch.is_some() || args.yaw.is_some() {
        let pitch = args.pitch.unwrap_or(camera.pitch());
        let yaw = args.yaw.unwrap_or(camera.yaw());
        camera.set_rotation(pitch, yaw);
    }
    if let Some(fov) = args.fov {
        camera.set_fov(fov);
    }

    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let settings = load_settings(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    log::info!("Starting Lumen");

    let scene = RenderScene::new(build_scene(&args)?).context("Scene failed validation")?;
    let image = render(&scene, &settings);

    image
        .save_bmp(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
