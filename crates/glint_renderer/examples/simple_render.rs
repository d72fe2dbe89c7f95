//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it and saves a PNG.
//!
//! Run with: cargo run --example simple_render -- output.png

use glint_core::{Material, Scene, Shape};
use glint_renderer::{render, save_png, Camera, Color, FrustumMode, Light, RenderSettings, Vec3};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let output = std::env::args().nth(1).unwrap_or_else(|| "output.png".to_string());

    let scene = build_scene();
    let mut settings = RenderSettings::default().with_resolution(640, 360);
    settings.frustum_mode = FrustumMode::Corrected;
    settings.shadow_bias = 1e-3;

    let image = render(&scene, &settings)?;
    save_png(&image, &output)?;
    Ok(())
}

fn build_scene() -> Scene {
    let camera = Camera::new(Vec3::new(0.0, 2.0, -8.0), 50.0_f32.to_radians(), 0.3, 100.0)
        .looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
    let mut scene = Scene::new("simple", camera);

    let ground = scene.add_material(Material::new("ground", Color::new(0.5, 0.5, 0.5)));
    let red = scene.add_material(Material::new("red", Color::new(0.8, 0.2, 0.2)));
    let blue = scene.add_material(Material::new("blue", Color::new(0.2, 0.3, 0.8)));

    scene.add_shape(Shape::Plane {
        point: Vec3::ZERO,
        normal: Vec3::Y,
        material: Some(ground),
    });
    scene.add_shape(Shape::Sphere {
        center: Vec3::new(-1.2, 1.0, 0.0),
        radius: 1.0,
        material: Some(red),
    });
    scene.add_shape(Shape::Sphere {
        center: Vec3::new(1.4, 0.7, 0.5),
        radius: 0.7,
        material: Some(blue),
    });

    scene.add_light(Light::directional(Vec3::new(-0.4, -1.0, 0.5), Color::ONE, 1.0));
    scene
}
