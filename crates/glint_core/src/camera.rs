//! Pinhole camera description.

use glint_math::{Quat, Vec3};
use serde::Deserialize;
use thiserror::Error;

use crate::loader::CameraDesc;
use crate::scene::Transform;

/// Camera parameters that make a render impossible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("near clip must be positive and below far clip (near={near}, far={far})")]
    InvalidClip { near: f32, far: f32 },

    #[error("vertical field of view must be in (0, 180) degrees, got {0} degrees")]
    InvalidFov(f32),
}

/// Camera for rendering a still image.
///
/// Local +Z is the viewing direction, +X is right and +Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "CameraDesc")]
pub struct Camera {
    pub transform: Transform,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create an unrotated camera at `position` looking down +Z.
    pub fn new(position: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            transform: Transform::from_translation(position),
            fov_y,
            near,
            far,
        }
    }

    /// Point the camera at `target`, keeping `up` as the vertical reference.
    pub fn looking_at(mut self, target: Vec3, up: Vec3) -> Self {
        self.transform.rotation = Transform::look_rotation(target - self.position(), up);
        self
    }

    /// Replace the camera orientation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn right(&self) -> Vec3 {
        self.transform.right()
    }

    pub fn up(&self) -> Vec3 {
        self.transform.up()
    }

    /// Check the clip planes and field of view.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(CameraError::InvalidClip {
                near: self.near,
                far: self.far,
            });
        }
        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(CameraError::InvalidFov(self.fov_y.to_degrees()));
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 60.0_f32.to_radians(), 0.3, 1000.0)
    }
}
