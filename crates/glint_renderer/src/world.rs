//! Scene queries used by the shader.
//!
//! `SceneQuery` is the seam between shading and geometry: the shader only
//! asks for the nearest hit along a ray and for the material behind a hit.
//! `World` is the in-process implementation built from a `glint_core::Scene`.

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::{Plane, Quad, Sphere, Triangle};
use glint_core::{Material, Scene, Shape};
use glint_math::{Interval, Ray};

/// Read-only geometry and material queries.
///
/// Implementations must be safe to query from several render threads at once.
pub trait SceneQuery: Send + Sync {
    /// Nearest hit with distance in `(0, max_distance)`, or `None`.
    fn intersect(&self, ray: &Ray, max_distance: f32) -> Option<HitRecord>;

    /// Material behind a hit, or `None` if the surface has nothing to shade.
    fn resolve_material(&self, hit: &HitRecord) -> Option<&Material>;
}

/// Shapes and materials of a scene, ready for ray queries.
pub struct World {
    objects: HittableList,
    materials: Vec<Material>,
}

impl World {
    /// Create a world from prepared geometry and a material table.
    pub fn new(objects: HittableList, materials: Vec<Material>) -> Self {
        Self { objects, materials }
    }

    /// Build the intersectable form of every shape in `scene`.
    pub fn from_scene(scene: &Scene) -> Self {
        let mut objects = HittableList::new();
        for shape in &scene.shapes {
            objects.add(build_shape(shape));
        }

        log::debug!(
            "Built world for '{}': {} objects, {} materials",
            scene.name,
            objects.len(),
            scene.materials.len()
        );

        Self::new(objects, scene.materials.clone())
    }

    /// Number of intersectable objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

fn build_shape(shape: &Shape) -> Box<dyn Hittable> {
    match *shape {
        Shape::Sphere {
            center,
            radius,
            material,
        } => Box::new(Sphere::new(center, radius, material)),
        Shape::Plane {
            point,
            normal,
            material,
        } => Box::new(Plane::new(point, normal, material)),
        Shape::Triangle {
            vertices: [v0, v1, v2],
            material,
        } => Box::new(Triangle::new(v0, v1, v2, material)),
        Shape::Quad {
            corner,
            u,
            v,
            material,
        } => Box::new(Quad::new(corner, u, v, material)),
    }
}

impl SceneQuery for World {
    fn intersect(&self, ray: &Ray, max_distance: f32) -> Option<HitRecord> {
        self.objects.hit(ray, Interval::ahead(max_distance))
    }

    fn resolve_material(&self, hit: &HitRecord) -> Option<&Material> {
        hit.material.and_then(|id| self.materials.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Camera;
    use glint_math::{Color, Vec3};

    fn two_sphere_scene() -> Scene {
        let mut scene = Scene::new("spheres", Camera::default());
        let red = scene.add_material(Material::new("red", Color::new(0.8, 0.2, 0.2)));
        scene.add_shape(Shape::Sphere {
            center: Vec3::new(0.0, 0.0, 5.0),
            radius: 1.0,
            material: Some(red),
        });
        scene.add_shape(Shape::Sphere {
            center: Vec3::new(3.0, 0.0, 5.0),
            radius: 1.0,
            material: None,
        });
        scene
    }

    #[test]
    fn test_from_scene() {
        let world = World::from_scene(&two_sphere_scene());
        assert_eq!(world.object_count(), 2);
    }

    #[test]
    fn test_intersect_and_resolve() {
        let world = World::from_scene(&two_sphere_scene());

        let hit = world.intersect(&Ray::new(Vec3::ZERO, Vec3::Z), 200.0).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
        let material = world.resolve_material(&hit).unwrap();
        assert_eq!(material.name, "red");

        let bare = world
            .intersect(&Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z), 200.0)
            .unwrap();
        assert!(world.resolve_material(&bare).is_none());
    }

    #[test]
    fn test_max_distance_clips() {
        let world = World::from_scene(&two_sphere_scene());
        assert!(world.intersect(&Ray::new(Vec3::ZERO, Vec3::Z), 3.0).is_none());
    }

    #[test]
    fn test_every_shape_kind_builds() {
        let mut scene = Scene::new("kinds", Camera::default());
        scene.add_shape(Shape::Plane {
            point: Vec3::new(0.0, -1.0, 0.0),
            normal: Vec3::Y,
            material: None,
        });
        scene.add_shape(Shape::Triangle {
            vertices: [Vec3::ZERO, Vec3::X, Vec3::Y],
            material: None,
        });
        scene.add_shape(Shape::Quad {
            corner: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Z,
            material: None,
        });

        let world = World::from_scene(&scene);
        assert_eq!(world.object_count(), 3);
        let hit = world
            .intersect(&Ray::new(Vec3::new(0.5, 5.0, 5.0), Vec3::NEG_Y), 200.0)
            .unwrap();
        assert!((hit.t - 6.0).abs() < 1e-4);
    }
}
