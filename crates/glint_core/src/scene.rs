//! Scene types for Glint.
//!
//! A `Scene` is a plain value that owns everything a render reads: the
//! camera, an ordered light list, materials and shapes. Nothing is looked up
//! through global state.

use glint_math::{Color, Mat3, Quat, Vec3};
use serde::Deserialize;

use crate::camera::Camera;
use crate::light::Light;
use crate::settings::{LightSelection, SceneSettings};

/// A diffuse surface description.
///
/// `smoothness` and `metallic` are carried with the material but the shading
/// model does not read them yet.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Material name (for logs and scene files)
    pub name: String,

    /// Base color (RGB, 0-1)
    pub base_color: Color,

    /// Smoothness factor (0=rough, 1=mirror-like)
    pub smoothness: f32,

    /// Metallic factor (0=dielectric, 1=metal)
    pub metallic: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: Color::ONE,
            smoothness: 0.5,
            metallic: 0.0,
        }
    }
}

impl Material {
    /// Create a new material with just a name and base color.
    pub fn new(name: impl Into<String>, base_color: Color) -> Self {
        Self {
            name: name.into(),
            base_color,
            ..Default::default()
        }
    }
}

/// Position and orientation of a camera or light.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Create a transform whose forward axis points along `direction`.
    pub fn looking_along(translation: Vec3, direction: Vec3) -> Self {
        Self {
            translation,
            rotation: Transform::look_rotation(direction, Vec3::Y),
        }
    }

    /// Rotation taking local +Z onto `direction` with `up` kept vertical.
    ///
    /// Falls back to the shortest arc when `direction` is parallel to `up`.
    pub fn look_rotation(direction: Vec3, up: Vec3) -> Quat {
        let forward = direction.normalize_or_zero();
        if forward == Vec3::ZERO {
            return Quat::IDENTITY;
        }

        let right = up.cross(forward);
        if right.length_squared() < 1e-12 {
            return Quat::from_rotation_arc(Vec3::Z, forward);
        }
        let right = right.normalize();
        let up = forward.cross(right);

        Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize()
    }

    /// Local +Z in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local +X in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local +Y in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Scene geometry, described independently of how it is intersected.
///
/// `material` indexes into `Scene::materials`; `None` marks a surface with
/// nothing to shade (it renders black).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Sphere {
        center: Vec3,
        radius: f32,
        #[serde(default)]
        material: Option<usize>,
    },
    /// Infinite plane through `point`.
    Plane {
        point: Vec3,
        normal: Vec3,
        #[serde(default)]
        material: Option<usize>,
    },
    Triangle {
        vertices: [Vec3; 3],
        #[serde(default)]
        material: Option<usize>,
    },
    /// Parallelogram spanned by `u` and `v` from `corner`.
    Quad {
        corner: Vec3,
        u: Vec3,
        v: Vec3,
        #[serde(default)]
        material: Option<usize>,
    },
}

impl Shape {
    /// Material index of this shape, if any.
    pub fn material(&self) -> Option<usize> {
        match self {
            Shape::Sphere { material, .. }
            | Shape::Plane { material, .. }
            | Shape::Triangle { material, .. }
            | Shape::Quad { material, .. } => *material,
        }
    }

    /// Short name for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Plane { .. } => "plane",
            Shape::Triangle { .. } => "triangle",
            Shape::Quad { .. } => "quad",
        }
    }
}

/// A complete scene: camera, lights, materials, shapes and render settings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    pub camera: Camera,

    /// Lights in priority order; only one is consulted per render
    pub lights: Vec<Light>,

    /// Materials referenced by shapes
    pub materials: Vec<Material>,

    pub shapes: Vec<Shape>,

    pub settings: SceneSettings,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Append a light; earlier lights take priority.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Get a material by ID.
    pub fn get_material(&self, id: usize) -> Option<&Material> {
        self.materials.get(id)
    }

    /// The light the shader will consult under the scene's selection policy.
    pub fn primary_light(&self) -> Option<&Light> {
        self.settings.light_selection.pick(&self.lights)
    }

    /// Pick a light with an explicit policy.
    pub fn select_light(&self, selection: LightSelection) -> Option<&Light> {
        selection.pick(&self.lights)
    }

    /// Get shape count.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}
