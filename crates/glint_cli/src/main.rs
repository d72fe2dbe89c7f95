use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene, FrustumMode};
use glint_renderer::{render, save_png, RenderSettings};
use std::path::PathBuf;

/// Render a JSON scene to a PNG with one ray per pixel.
#[derive(Parser, Debug)]
#[command(name = "glint", version, about)]
struct Args {
    /// Scene file to render
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Output PNG path
    #[arg(long, short = 'o', value_name = "PATH", default_value = "SavedScreen.png")]
    output: PathBuf,

    /// Override the scene's image width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene's image height
    #[arg(long)]
    height: Option<u32>,

    /// Brightness multiplier for shadowed points, in [0, 1]
    #[arg(long, value_name = "FACTOR")]
    shadow_hardness: Option<f32>,

    /// Use the far plane at `far` and camera-relative corner offsets
    #[arg(long)]
    corrected_frustum: bool,

    /// Render on the calling thread only
    #[arg(long)]
    serial: bool,
}

impl Args {
    fn apply(&self, mut settings: RenderSettings) -> RenderSettings {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(hardness) = self.shadow_hardness {
            settings.shadow_hardness = hardness;
        }
        if self.corrected_frustum {
            settings.frustum_mode = FrustumMode::Corrected;
        }
        if self.serial {
            settings.parallel = false;
        }
        settings
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let settings = args.apply(RenderSettings::from_scene_settings(&scene.settings));

    let image = render(&scene, &settings).context("Render failed")?;
    save_png(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glint", "scene.json"]).unwrap();
        assert_eq!(args.output, PathBuf::from("SavedScreen.png"));
        assert!(!args.serial && !args.corrected_frustum);

        let settings = args.apply(RenderSettings::default());
        assert_eq!((settings.width, settings.height), (1024, 768));
        assert_eq!(settings.shadow_hardness, 0.5);
        assert!(settings.parallel);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "glint",
            "scene.json",
            "-o",
            "out.png",
            "--width",
            "64",
            "--height",
            "48",
            "--shadow-hardness",
            "0.3",
            "--corrected-frustum",
            "--serial",
        ])
        .unwrap();

        let settings = args.apply(RenderSettings::default());
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!((settings.width, settings.height), (64, 48));
        assert_eq!(settings.shadow_hardness, 0.3);
        assert_eq!(settings.frustum_mode, FrustumMode::Corrected);
        assert!(!settings.parallel);
    }

    #[test]
    fn test_scene_is_required() {
        assert!(Args::try_parse_from(["glint"]).is_err());
    }
}
