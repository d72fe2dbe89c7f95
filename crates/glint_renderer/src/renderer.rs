//! Render driver.
//!
//! Builds the frustum once, then shades every pixel independently:
//! - Primary ray from the frustum
//! - Nearest-hit shading with one light and a shadow test
//! - Optional bucket-parallel execution with rayon

use crate::bucket::render_buckets;
use crate::frustum::FrustumGeometry;
use crate::output::ImageBuffer;
use crate::shader::{shade, ShadeSettings, DEFAULT_MAX_DISTANCE};
use crate::world::{SceneQuery, World};
use crate::DEFAULT_BUCKET_SIZE;
use glint_core::{Camera, CameraError, FrustumMode, Light, LightSelection, Scene, SceneSettings};
use glint_math::Color;
use std::time::Instant;
use thiserror::Error;

/// Errors that stop a render before any pixel is computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid camera: {0}")]
    InvalidCamera(#[from] CameraError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Factor applied to shadowed pixels, in (0, 1)
    pub shadow_hardness: f32,
    pub shadow_bias: f32,
    pub frustum_mode: FrustumMode,
    pub light_selection: LightSelection,
    /// Query distance for primary rays
    pub max_distance: f32,
    /// Query distance for shadow rays
    pub shadow_distance: f32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::from_scene_settings(&SceneSettings::default())
    }
}

impl RenderSettings {
    /// Render settings from a scene file's `settings` block.
    pub fn from_scene_settings(settings: &SceneSettings) -> Self {
        Self {
            width: settings.width,
            height: settings.height,
            shadow_hardness: settings.shadow_hardness,
            shadow_bias: settings.shadow_bias,
            frustum_mode: settings.frustum_mode,
            light_selection: settings.light_selection,
            max_distance: DEFAULT_MAX_DISTANCE,
            shadow_distance: DEFAULT_MAX_DISTANCE,
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }

    /// Set the output resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the shadow hardness.
    pub fn with_shadow_hardness(mut self, shadow_hardness: f32) -> Self {
        self.shadow_hardness = shadow_hardness;
        self
    }

    /// Shading parameters derived from these settings.
    pub fn shade_settings(&self) -> ShadeSettings {
        ShadeSettings {
            max_distance: self.max_distance,
            shadow_distance: self.shadow_distance,
            shadow_hardness: self.shadow_hardness,
            shadow_bias: self.shadow_bias,
            light_selection: self.light_selection,
            ..Default::default()
        }
    }

    /// Reject settings no render can satisfy.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "resolution must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.shadow_hardness > 0.0 && self.shadow_hardness < 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "shadow hardness must be in (0, 1), got {}",
                self.shadow_hardness
            )));
        }
        if !(self.shadow_bias >= 0.0 && self.shadow_bias.is_finite()) {
            return Err(RenderError::InvalidConfig(format!(
                "shadow bias must be a non-negative number, got {}",
                self.shadow_bias
            )));
        }
        if !(self.max_distance > 0.0 && self.shadow_distance > 0.0) {
            return Err(RenderError::InvalidConfig(
                "query distances must be positive".to_string(),
            ));
        }
        if self.parallel && self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig("bucket size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Shade a single pixel.
pub fn render_pixel<S: SceneQuery + ?Sized>(
    frustum: &FrustumGeometry,
    scene: &S,
    lights: &[Light],
    x: u32,
    y: u32,
    shading: &ShadeSettings,
) -> Color {
    let ray = frustum.generate_ray(x, y);
    shade(&ray, scene, lights, shading)
}

/// Render the scene seen by `camera` into a new image buffer.
///
/// Configuration is validated before any pixel is shaded. The buffer is fully
/// populated on return; pixel order does not affect the result.
pub fn render_scene<S: SceneQuery + ?Sized>(
    scene: &S,
    camera: &Camera,
    lights: &[Light],
    settings: &RenderSettings,
) -> RenderResult<ImageBuffer> {
    settings.validate()?;
    let frustum = FrustumGeometry::build(camera, settings.width, settings.height, settings.frustum_mode)?;
    let shading = settings.shade_settings();

    if shading.light_selection.pick(lights).is_none() {
        log::warn!(
            "No light selected by {:?} among {} lights; direct lighting is zero",
            shading.light_selection,
            lights.len()
        );
    }

    log::info!(
        "Rendering {}x{} ({}, shadow hardness {})",
        settings.width,
        settings.height,
        if settings.parallel { "parallel" } else { "serial" },
        settings.shadow_hardness
    );
    let start = Instant::now();

    let image = if settings.parallel {
        render_buckets(&frustum, scene, lights, &shading, settings.bucket_size)
    } else {
        render_serial(&frustum, scene, lights, &shading)
    };

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render a loaded scene with its own camera and lights.
pub fn render(scene: &Scene, settings: &RenderSettings) -> RenderResult<ImageBuffer> {
    let world = World::from_scene(scene);
    render_scene(&world, &scene.camera, &scene.lights, settings)
}

/// Single-threaded pixel loop.
fn render_serial<S: SceneQuery + ?Sized>(
    frustum: &FrustumGeometry,
    scene: &S,
    lights: &[Light],
    shading: &ShadeSettings,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(frustum.width, frustum.height);

    for y in 0..frustum.height {
        for x in 0..frustum.width {
            let color = render_pixel(frustum, scene, lights, x, y, shading);
            image.set(x, y, color);
        }
    }

    image
}
