//! Scene file loading.
//!
//! Scene files are JSON. Cameras and lights are written in a friendlier form
//! (degrees, look-at targets, light directions) and converted on load.

use std::fs;
use std::path::Path;

use glint_math::{Color, Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::camera::{Camera, CameraError};
use crate::light::{Light, LightKind};
use crate::scene::{Scene, Shape, Transform};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    InvalidCamera(#[from] CameraError),

    #[error("Shape {shape} references missing material {material}")]
    InvalidMaterial { shape: usize, material: usize },

    #[error("Shape {shape} ({kind}) is degenerate: {reason}")]
    InvalidShape {
        shape: usize,
        kind: &'static str,
        reason: &'static str,
    },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Camera as written in a scene file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct CameraDesc {
    position: Vec3,
    /// Point to look at; wins over `rotation`
    target: Option<Vec3>,
    up: Vec3,
    rotation: Option<Quat>,
    fov_degrees: f32,
    near: f32,
    far: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position(),
            target: None,
            up: Vec3::Y,
            rotation: None,
            fov_degrees: camera.fov_y.to_degrees(),
            near: camera.near,
            far: camera.far,
        }
    }
}

impl From<CameraDesc> for Camera {
    fn from(desc: CameraDesc) -> Self {
        let camera = Camera::new(desc.position, desc.fov_degrees.to_radians(), desc.near, desc.far);
        match (desc.target, desc.rotation) {
            (Some(target), _) => camera.looking_at(target, desc.up),
            (None, Some(rotation)) => camera.with_rotation(rotation.normalize()),
            (None, None) => camera,
        }
    }
}

/// Light as written in a scene file.
#[derive(Debug, Deserialize)]
pub(crate) struct LightDesc {
    kind: LightKind,
    #[serde(default)]
    position: Vec3,
    /// Direction the light shines in; wins over `rotation`
    #[serde(default)]
    direction: Option<Vec3>,
    #[serde(default)]
    rotation: Option<Quat>,
    #[serde(default = "white")]
    color: Color,
    #[serde(default = "unit_intensity")]
    intensity: f32,
}

fn white() -> Color {
    Color::ONE
}

fn unit_intensity() -> f32 {
    1.0
}

impl From<LightDesc> for Light {
    fn from(desc: LightDesc) -> Self {
        let rotation = match (desc.direction, desc.rotation) {
            (Some(direction), _) => Transform::look_rotation(direction, Vec3::Y),
            (None, Some(rotation)) => rotation.normalize(),
            (None, None) => Quat::IDENTITY,
        };
        Light {
            kind: desc.kind,
            transform: Transform {
                translation: desc.position,
                rotation,
            },
            color: desc.color,
            intensity: desc.intensity,
        }
    }
}

/// Load a scene file from disk.
///
/// The scene name defaults to the file stem when the file does not set one.
///
/// # Example
///
/// ```ignore
/// use glint_core::load_scene;
///
/// let scene = load_scene("scenes/red_wall.json")?;
/// println!("Loaded {} shapes", scene.shape_count());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let source = fs::read_to_string(path)?;
    let mut scene: Scene = serde_json::from_str(&source)?;
    if scene.name.is_empty() {
        scene.name = name.to_string();
    }

    validate_scene(&scene)?;

    log::info!(
        "Loaded scene '{}' from {}: {} shapes, {} materials, {} lights",
        scene.name,
        path.display(),
        scene.shapes.len(),
        scene.materials.len(),
        scene.lights.len()
    );
    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(source: &str) -> LoadResult<Scene> {
    let scene: Scene = serde_json::from_str(source)?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Check everything a render would otherwise trip over.
pub fn validate_scene(scene: &Scene) -> LoadResult<()> {
    scene.camera.validate()?;

    let settings = &scene.settings;
    if settings.width == 0 || settings.height == 0 {
        return Err(LoadError::InvalidSettings(format!(
            "resolution must be positive, got {}x{}",
            settings.width, settings.height
        )));
    }
    if !(settings.shadow_hardness > 0.0 && settings.shadow_hardness < 1.0) {
        return Err(LoadError::InvalidSettings(format!(
            "shadow_hardness must be in (0, 1), got {}",
            settings.shadow_hardness
        )));
    }
    if !(settings.shadow_bias >= 0.0 && settings.shadow_bias.is_finite()) {
        return Err(LoadError::InvalidSettings(format!(
            "shadow_bias must be a non-negative number, got {}",
            settings.shadow_bias
        )));
    }

    for (index, shape) in scene.shapes.iter().enumerate() {
        if let Some(material) = shape.material() {
            if material >= scene.materials.len() {
                return Err(LoadError::InvalidMaterial {
                    shape: index,
                    material,
                });
            }
        }
        if let Some(reason) = degenerate_reason(shape) {
            return Err(LoadError::InvalidShape {
                shape: index,
                kind: shape.kind(),
                reason,
            });
        }
    }

    if scene.lights.is_empty() {
        log::warn!("Scene '{}' has no lights; surfaces will render black", scene.name);
    } else if scene.primary_light().is_none() {
        log::warn!(
            "Scene '{}' selects {:?} but has {} lights; surfaces will render black",
            scene.name,
            settings.light_selection,
            scene.lights.len()
        );
    }

    Ok(())
}

fn degenerate_reason(shape: &Shape) -> Option<&'static str> {
    match shape {
        Shape::Sphere { radius, .. } if !(*radius > 0.0) => Some("radius must be positive"),
        Shape::Plane { normal, .. } if normal.length_squared() == 0.0 => {
            Some("normal must be non-zero")
        }
        Shape::Triangle { vertices: [a, b, c], .. } if (*b - *a).cross(*c - *a).length_squared() == 0.0 => {
            Some("vertices are collinear")
        }
        Shape::Quad { u, v, .. } if u.cross(*v).length_squared() == 0.0 => {
            Some("edges are parallel")
        }
        _ => None,
    }
}
