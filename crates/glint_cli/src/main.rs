use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{demo, load_scene, random_spheres, save_scene, SceneDescription};
use glint_renderer::{build_world, render, render_single_threaded, save_image, RenderConfig};

mod cli;

use cli::{Args, Builtin};

/// Initialize the logger with the specified level
fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut desc = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => match args.builtin {
            Builtin::Demo => demo(),
            Builtin::Random => random_spheres(args.seed),
        },
    };

    if let Some(aspect_ratio) = args.aspect_ratio {
        desc.camera.aspect_ratio = aspect_ratio;
    }

    Ok(desc)
}

fn render_config(args: &Args, aspect_ratio: f32) -> RenderConfig {
    let height = RenderConfig::height_for_aspect(args.width, aspect_ratio);
    let mut config = RenderConfig::default()
        .with_resolution(args.width, height)
        .with_quality(args.samples, args.max_depth)
        .with_seed(args.seed);

    if let Some(tiles) = args.tiles {
        config = config.with_tiles(tiles);
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.log_level.into());

    let start = Instant::now();
    let desc = load_description(&args)?;
    if let Some(path) = &args.export_scene {
        save_scene(path, &desc)
            .with_context(|| format!("Failed to export scene to {}", path.display()))?;
    }

    let (world, camera) = build_world(&desc).context("Invalid scene")?;
    log::info!("Scene built in {:?} ({} spheres)", start.elapsed(), world.len());

    let config = render_config(&args, desc.camera.aspect_ratio);

    let start = Instant::now();
    let image = if args.single_threaded {
        render_single_threaded(&camera, &world, &config)
    } else {
        render(&camera, &world, &config)?
    };
    log::info!("Rendered in {:?}", start.elapsed());

    save_image(&args.output, &image)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_from_args() {
        let args = Args::parse_from(["glint", "--width", "300", "-s", "7", "--tiles", "5"]);
        let config = render_config(&args, 1.5);
        assert_eq!(config.image_width, 300);
        assert_eq!(config.image_height, 200);
        assert_eq!(config.samples_per_pixel, 7);
        assert_eq!(config.tiles, 5);
    }

    #[test]
    fn test_aspect_ratio_override() {
        let args = Args::parse_from(["glint", "--builtin", "demo", "--aspect-ratio", "2.0"]);
        let desc = load_description(&args).unwrap();
        assert_eq!(desc.camera.aspect_ratio, 2.0);
        assert_eq!(desc.spheres.len(), 5);
    }
}
