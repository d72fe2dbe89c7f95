//! Parallelogram primitive.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Interval, Ray, Vec3};

/// A parallelogram with one corner at `q` and edges `u` and `v`.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// Plane normal (unit length) and offset
    normal: Vec3,
    d: f32,
    /// `n / (n . n)` with the unnormalized normal, for planar coordinates
    w: Vec3,
    material: Option<usize>,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Option<usize>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        Self {
            q,
            u,
            v,
            normal,
            d: normal.dot(q),
            w: n / n.dot(n),
            material,
        }
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        // Planar coordinates of the hit relative to q
        let planar = ray.at(t) - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));
        if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, self.material).with_uv(alpha, beta))
    }
}
