//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Interval, Ray, Vec3};

/// An unbounded plane through `point` with unit `normal`.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    /// Tangent basis for planar UVs
    tangent: Vec3,
    bitangent: Vec3,
    material: Option<usize>,
}

impl Plane {
    /// Create a new plane. `normal` does not need to be unit length.
    pub fn new(point: Vec3, normal: Vec3, material: Option<usize>) -> Self {
        let normal = normal.normalize();
        let (tangent, bitangent) = normal.any_orthonormal_pair();
        Self {
            point,
            normal,
            tangent,
            bitangent,
            material,
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let local = ray.at(t) - self.point;
        Some(
            HitRecord::new(ray, t, self.normal, self.material)
                .with_uv(local.dot(self.tangent), local.dot(self.bitangent)),
        )
    }
}
