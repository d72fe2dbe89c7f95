//! Render settings carried by a scene file.

use serde::Deserialize;

use crate::light::Light;

/// How the camera frustum corners are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrustumMode {
    /// Far plane sits at `near + far` along forward and corner offsets are
    /// world-axis aligned, which is only exact for an unrotated camera.
    #[default]
    Compatible,
    /// Far plane at the true far distance, offsets along the camera basis.
    Corrected,
}

/// Which light the shader consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightSelection {
    #[default]
    First,
    Index(usize),
}

impl LightSelection {
    /// The selected light, or `None` when the list has nothing at that slot.
    pub fn pick<'a>(&self, lights: &'a [Light]) -> Option<&'a Light> {
        match *self {
            LightSelection::First => lights.first(),
            LightSelection::Index(index) => lights.get(index),
        }
    }
}

/// Output resolution and shading knobs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub width: u32,
    pub height: u32,
    /// Factor applied to shadowed pixels, in (0, 1)
    pub shadow_hardness: f32,
    /// Offset of the shadow ray origin along the surface normal
    pub shadow_bias: f32,
    pub frustum_mode: FrustumMode,
    pub light_selection: LightSelection,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            shadow_hardness: 0.5,
            shadow_bias: 0.0,
            frustum_mode: FrustumMode::Compatible,
            light_selection: LightSelection::First,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::{Color, Vec3};

    #[test]
    fn test_pick_on_empty_list() {
        assert!(LightSelection::First.pick(&[]).is_none());
        assert!(LightSelection::Index(0).pick(&[]).is_none());
    }

    #[test]
    fn test_pick_index() {
        let lights = [
            Light::point(Vec3::ZERO, Color::ONE, 1.0),
            Light::point(Vec3::ONE, Color::ONE, 3.0),
        ];
        assert_eq!(LightSelection::First.pick(&lights).map(|l| l.intensity), Some(1.0));
        assert_eq!(LightSelection::Index(1).pick(&lights).map(|l| l.intensity), Some(3.0));
    }

    #[test]
    fn test_settings_from_json() {
        let settings: SceneSettings = serde_json::from_str(
            r#"{ "width": 64, "frustum_mode": "corrected", "light_selection": { "index": 2 } }"#,
        )
        .unwrap();

        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 768);
        assert_eq!(settings.frustum_mode, FrustumMode::Corrected);
        assert_eq!(settings.light_selection, LightSelection::Index(2));
    }
}
