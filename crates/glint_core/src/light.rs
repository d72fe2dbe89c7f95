//! Light sources.

use glint_math::{Color, Vec3};
use serde::Deserialize;

use crate::loader::LightDesc;
use crate::scene::Transform;

/// Light types understood by scene files.
///
/// Only `Directional` and `Point` contribute light; `Spot` and `Area` are
/// accepted so scenes load, but they shade as unlit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    Area,
}

/// A light with a placement, color and intensity.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "LightDesc")]
pub struct Light {
    pub kind: LightKind,
    pub transform: Transform,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Directional light shining along `direction`.
    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            transform: Transform::looking_along(Vec3::ZERO, direction),
            color,
            intensity,
        }
    }

    /// Point light at `position`.
    pub fn point(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            transform: Transform::from_translation(position),
            color,
            intensity,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Direction the light shines in.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Color scaled by intensity.
    pub fn radiance(&self) -> Color {
        self.color * self.intensity
    }
}
