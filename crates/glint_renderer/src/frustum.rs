//! Camera frustum geometry and primary ray generation.

use crate::renderer::{RenderError, RenderResult};
use glint_core::{Camera, FrustumMode};
use glint_math::{Ray, Vec3};

/// Near and far rectangles of the view frustum, built once per render.
///
/// Rays start on the near rectangle and aim at the matching point on the far
/// rectangle. Pixel `(0, 0)` sits on the "zero" corner of each rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumGeometry {
    pub width: u32,
    pub height: u32,
    pub aspect: f32,

    // Full rectangle sizes at the near and far planes
    pub h_near: f32,
    pub w_near: f32,
    pub h_far: f32,
    pub w_far: f32,

    pub near_zero: Vec3,
    pub far_zero: Vec3,

    /// Axes the per-pixel offsets run along
    right: Vec3,
    up: Vec3,
}

impl FrustumGeometry {
    /// Derive the frustum for `camera` at the given output resolution.
    ///
    /// In `Compatible` mode the far plane sits at `near + far` along the
    /// camera's forward axis and corner offsets use world X/Y, so the result
    /// is only exact for cameras that are not rotated about X or Z. The near
    /// corner is top-left and the far corner bottom-left. `Corrected` mode
    /// places the far plane at `far` and runs both corners and offsets along
    /// the camera's own right/up axes, starting bottom-left.
    pub fn build(camera: &Camera, width: u32, height: u32, mode: FrustumMode) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "resolution must be positive, got {width}x{height}"
            )));
        }
        camera.validate()?;

        let angle = (0.5 * camera.fov_y).tan();
        let aspect = width as f32 / height as f32;

        let h_near = 2.0 * angle * camera.near;
        let w_near = h_near * aspect;
        let h_far = 2.0 * angle * camera.far;
        let w_far = h_far * aspect;

        let position = camera.position();
        let forward = camera.forward();
        let near_center = position + forward * camera.near;

        let (far_zero, near_zero, right, up) = match mode {
            FrustumMode::Compatible => {
                let far_center = position + forward * (camera.near + camera.far);
                (
                    far_center + Vec3::new(-w_far * 0.5, -h_far * 0.5, 0.0),
                    near_center + Vec3::new(-w_near * 0.5, h_near * 0.5, 0.0),
                    Vec3::X,
                    Vec3::Y,
                )
            }
            FrustumMode::Corrected => {
                let (right, up) = (camera.right(), camera.up());
                let far_center = position + forward * camera.far;
                (
                    far_center - right * (w_far * 0.5) - up * (h_far * 0.5),
                    near_center - right * (w_near * 0.5) - up * (h_near * 0.5),
                    right,
                    up,
                )
            }
        };

        log::debug!(
            "Frustum ({mode:?}) {width}x{height}: near {w_near:.4}x{h_near:.4}, far {w_far:.4}x{h_far:.4}"
        );

        Ok(Self {
            width,
            height,
            aspect,
            h_near,
            w_near,
            h_far,
            w_far,
            near_zero,
            far_zero,
            right,
            up,
        })
    }

    /// Primary ray through pixel `(x, y)`.
    ///
    /// The origin lies on the near rectangle and the direction is unit length.
    pub fn generate_ray(&self, x: u32, y: u32) -> Ray {
        let (px, py) = (x as f32, y as f32);
        let (width, height) = (self.width as f32, self.height as f32);

        let origin = self.near_zero
            + self.right * (self.w_near / width * px)
            + self.up * (self.h_near / height * py);
        let destination = self.far_zero
            + self.right * (self.w_far / width * px)
            + self.up * (self.h_far / height * py);

        Ray::between(origin, destination)
    }
}
