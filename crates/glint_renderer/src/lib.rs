//! Glint Renderer - CPU ray tracing.
//!
//! Casts one primary ray per pixel through the camera frustum, shades the
//! nearest hit with a single light and a binary shadow test, and writes the
//! result into an image buffer that can be saved as PNG.

mod bucket;
mod frustum;
mod hittable;
mod output;
mod plane;
mod quad;
mod renderer;
mod shader;
mod sphere;
mod triangle;
mod world;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use frustum::FrustumGeometry;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use output::{color_to_rgba, save_png, ImageBuffer, OutputError, OutputResult};
pub use plane::Plane;
pub use quad::Quad;
pub use renderer::{render, render_pixel, render_scene, RenderError, RenderResult, RenderSettings};
pub use shader::{light_direction, shade, shadow_factor, ShadeSettings, BACKGROUND, DEFAULT_MAX_DISTANCE};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use world::{SceneQuery, World};

/// Re-export scene and math types used in the public API
pub use glint_core::{Camera, FrustumMode, Light, LightKind, LightSelection, Material, Scene};
pub use glint_math::{Color, Interval, Ray, Vec3};
