//! Direct diffuse shading with a single light and a binary shadow test.

use crate::hittable::HitRecord;
use crate::world::SceneQuery;
use glint_core::{Light, LightKind, LightSelection};
use glint_math::{Color, Interval, Ray, Vec3};

/// Color returned when a primary ray hits nothing.
pub const BACKGROUND: Color = Color::new(0.25, 0.25, 0.25);

/// Default query distance for primary and shadow rays.
pub const DEFAULT_MAX_DISTANCE: f32 = 200.0;

/// Per-render shading parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeSettings {
    /// Query distance for primary rays
    pub max_distance: f32,
    /// Query distance for shadow rays
    pub shadow_distance: f32,
    /// Factor applied when the shadow ray is blocked, in (0, 1)
    pub shadow_hardness: f32,
    /// Offset of the shadow ray origin along the hit normal
    pub shadow_bias: f32,
    pub light_selection: LightSelection,
    pub background: Color,
}

impl Default for ShadeSettings {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            shadow_distance: DEFAULT_MAX_DISTANCE,
            shadow_hardness: 0.5,
            shadow_bias: 0.0,
            light_selection: LightSelection::First,
            background: BACKGROUND,
        }
    }
}

/// Compute the color seen along a primary ray.
///
/// Misses return the background, hits without a material return black, and
/// hits with no selectable light return black. Otherwise the result is the
/// Lambert term of the selected light, scaled by point-light falloff and the
/// shadow factor. No specular term is added.
pub fn shade<S: SceneQuery + ?Sized>(
    ray: &Ray,
    scene: &S,
    lights: &[Light],
    settings: &ShadeSettings,
) -> Color {
    let Some(hit) = scene.intersect(ray, settings.max_distance) else {
        return settings.background;
    };

    let Some(material) = scene.resolve_material(&hit) else {
        return Color::ZERO;
    };

    let Some(light) = settings.light_selection.pick(lights) else {
        return Color::ZERO;
    };

    let (light_dir, attenuation) = light_direction(light, &hit);
    let shadow = shadow_factor(scene, &hit, light_dir, settings);
    let n_dot_l = Interval::UNIT.clamp(hit.normal.dot(light_dir));

    n_dot_l * material.base_color * light.radiance() * attenuation * shadow
}

/// Direction from the hit toward the light, and distance attenuation.
///
/// Point lights fall off with the square of the primary hit distance `t`,
/// not the light-to-surface distance. Spot and area lights yield a zero
/// direction.
pub fn light_direction(light: &Light, hit: &HitRecord) -> (Vec3, f32) {
    match light.kind {
        LightKind::Directional => (-light.forward(), 1.0),
        LightKind::Point => (
            (light.position() - hit.p).normalize_or_zero(),
            1.0 / (hit.t * hit.t),
        ),
        LightKind::Spot | LightKind::Area => (Vec3::ZERO, 1.0),
    }
}

/// `shadow_hardness` if anything lies along the shadow ray, otherwise 1.
///
/// The ray is not clipped at the light, and with a zero bias it may hit the
/// surface it starts on.
pub fn shadow_factor<S: SceneQuery + ?Sized>(
    scene: &S,
    hit: &HitRecord,
    light_dir: Vec3,
    settings: &ShadeSettings,
) -> f32 {
    let shadow_ray = Ray::new(hit.p + hit.normal * settings.shadow_bias, light_dir);
    if shadow_ray.is_degenerate() {
        return 1.0;
    }

    match scene.intersect(&shadow_ray, settings.shadow_distance) {
        Some(_) => settings.shadow_hardness,
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Material;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers the first query with `primary` and every later one with `shadow`.
    struct Scripted {
        primary: Option<HitRecord>,
        shadow: Option<HitRecord>,
        material: Option<Material>,
        queries: AtomicUsize,
    }

    impl Scripted {
        fn new(primary: Option<HitRecord>, shadow: Option<HitRecord>, material: Option<Material>) -> Self {
            Self {
                primary,
                shadow,
                material,
                queries: AtomicUsize::new(0),
            }
        }
    }

    impl SceneQuery for Scripted {
        fn intersect(&self, _ray: &Ray, _max_distance: f32) -> Option<HitRecord> {
            match self.queries.fetch_add(1, Ordering::SeqCst) {
                0 => self.primary,
                _ => self.shadow,
            }
        }

        fn resolve_material(&self, _hit: &HitRecord) -> Option<&Material> {
            self.material.as_ref()
        }
    }

    fn hit_at(t: f32, normal: Vec3) -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material: Some(0),
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        }
    }

    fn red() -> Material {
        Material::new("red", Color::new(0.8, 0.2, 0.2))
    }

    fn sun_from_above() -> Light {
        Light::directional(Vec3::NEG_Y, Color::ONE, 1.0)
    }

    fn primary_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y)
    }

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).abs().max_element() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scripted::new(None, None, Some(red()));
        let color = shade(&primary_ray(), &scene, &[sun_from_above()], &ShadeSettings::default());
        assert_eq!(color, Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn test_missing_material_is_black() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, None);
        let color = shade(&primary_ray(), &scene, &[sun_from_above()], &ShadeSettings::default());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_empty_lights_is_black() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let color = shade(&primary_ray(), &scene, &[], &ShadeSettings::default());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_out_of_range_selection_is_black() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let settings = ShadeSettings {
            light_selection: LightSelection::Index(3),
            ..Default::default()
        };
        let color = shade(&primary_ray(), &scene, &[sun_from_above()], &settings);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_directional_facing_light() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let color = shade(&primary_ray(), &scene, &[sun_from_above()], &ShadeSettings::default());
        assert_color_eq(color, Color::new(0.8, 0.2, 0.2));
    }

    #[test]
    fn test_shadow_scales_by_hardness() {
        let settings = ShadeSettings {
            shadow_hardness: 0.3,
            ..Default::default()
        };
        let lights = [Light::directional(Vec3::new(0.3, -1.0, 0.2), Color::new(1.0, 0.9, 0.7), 1.5)];

        let lit = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let occluded = Scripted::new(
            Some(hit_at(5.0, Vec3::Y)),
            Some(hit_at(1.0, Vec3::NEG_Y)),
            Some(red()),
        );

        let unshadowed = shade(&primary_ray(), &lit, &lights, &settings);
        let shadowed = shade(&primary_ray(), &occluded, &lights, &settings);

        assert!(unshadowed.max_element() > 0.0);
        assert_color_eq(shadowed, unshadowed * 0.3);
    }

    #[test]
    fn test_back_facing_normal_is_black() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::NEG_Y)), None, Some(red()));
        let lights = [Light::directional(Vec3::NEG_Y, Color::new(5.0, 3.0, 1.0), 10.0)];
        let color = shade(&primary_ray(), &scene, &lights, &ShadeSettings::default());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_point_light_inverse_square() {
        let light = [Light::point(Vec3::new(0.0, 10.0, 0.0), Color::ONE, 1.0)];
        let settings = ShadeSettings::default();

        let near = Scripted::new(Some(hit_at(2.0, Vec3::Y)), None, Some(red()));
        let far = Scripted::new(Some(hit_at(6.0, Vec3::Y)), None, Some(red()));

        let near_color = shade(&primary_ray(), &near, &light, &settings);
        let far_color = shade(&primary_ray(), &far, &light, &settings);

        let expected = (6.0_f32 / 2.0).powi(2);
        assert!((near_color.x / far_color.x - expected).abs() < 1e-4);
        assert_color_eq(near_color, Color::new(0.8, 0.2, 0.2) / 4.0);
    }

    #[test]
    fn test_spot_light_contributes_nothing() {
        let mut spot = sun_from_above();
        spot.kind = LightKind::Spot;

        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let color = shade(&primary_ray(), &scene, &[spot], &ShadeSettings::default());
        assert_eq!(color, Color::ZERO);
        // Degenerate shadow ray is never cast
        assert_eq!(scene.queries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_only_first_light_is_used() {
        let scene = Scripted::new(Some(hit_at(5.0, Vec3::Y)), None, Some(red()));
        let lights = [
            sun_from_above(),
            Light::directional(Vec3::NEG_Y, Color::ONE, 100.0),
        ];
        let color = shade(&primary_ray(), &scene, &lights, &ShadeSettings::default());
        assert_color_eq(color, Color::new(0.8, 0.2, 0.2));
    }

    #[test]
    fn test_shading_is_deterministic() {
        let lights = [Light::point(Vec3::new(1.0, 4.0, -2.0), Color::new(0.9, 0.8, 1.0), 3.0)];
        let settings = ShadeSettings::default();

        let first = Scripted::new(Some(hit_at(3.5, Vec3::Y)), None, Some(red()));
        let second = Scripted::new(Some(hit_at(3.5, Vec3::Y)), None, Some(red()));

        assert_eq!(
            shade(&primary_ray(), &first, &lights, &settings),
            shade(&primary_ray(), &second, &lights, &settings)
        );
    }

    #[test]
    fn test_shadow_ray_uses_bias() {
        struct RecordOrigin(std::sync::Mutex<Vec<Vec3>>);
        impl SceneQuery for RecordOrigin {
            fn intersect(&self, ray: &Ray, _max_distance: f32) -> Option<HitRecord> {
                self.0.lock().unwrap().push(ray.origin());
                None
            }
            fn resolve_material(&self, _hit: &HitRecord) -> Option<&Material> {
                None
            }
        }

        let scene = RecordOrigin(std::sync::Mutex::new(Vec::new()));
        let hit = hit_at(5.0, Vec3::Y);
        let settings = ShadeSettings {
            shadow_bias: 0.01,
            ..Default::default()
        };

        assert_eq!(shadow_factor(&scene, &hit, Vec3::Y, &settings), 1.0);
        assert_eq!(scene.0.lock().unwrap()[0], Vec3::new(0.0, 0.01, 0.0));
    }
}
