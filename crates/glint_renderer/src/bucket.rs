//! Tile-parallel rendering.
//!
//! The image is cut into square buckets that rayon shades independently.
//! Shading only reads the scene, and each bucket owns a disjoint set of
//! pixels, so results are merged into the buffer after the parallel pass.

use crate::frustum::FrustumGeometry;
use crate::output::ImageBuffer;
use crate::renderer::render_pixel;
use crate::shader::ShadeSettings;
use crate::world::SceneQuery;
use glint_core::Light;
use glint_math::Color;
use rayon::prelude::*;

/// Edge length of a bucket when none is configured.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Rectangle of pixels shaded as one unit of work.
///
/// Buckets along the right and top edges are clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in the center-out schedule
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Image coordinates covered by this bucket, row by row.
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }

    /// Squared distance from the bucket's middle to `(cx, cy)`.
    fn distance_sq(&self, cx: f32, cy: f32) -> f32 {
        let mx = self.x as f32 + 0.5 * self.width as f32;
        let my = self.y as f32 + 0.5 * self.height as f32;
        (mx - cx).powi(2) + (my - cy).powi(2)
    }
}

/// Tile a `width` x `height` image and order the tiles center-out.
///
/// `index` is renumbered to match the returned order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let step = bucket_size.max(1);

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step as usize)
        .flat_map(|y| {
            (0..width).step_by(step as usize).map(move |x| {
                Bucket::new(x, y, step.min(width - x), step.min(height - y), 0)
            })
        })
        .collect();

    let (cx, cy) = (0.5 * width as f32, 0.5 * height as f32);
    buckets.sort_by(|a, b| a.distance_sq(cx, cy).total_cmp(&b.distance_sq(cx, cy)));

    for (index, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = index;
    }
    buckets
}

/// Colors of one bucket, in the order of [`Bucket::coords`].
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Store the bucket's colors at their image coordinates.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        for ((x, y), &color) in self.bucket.coords().zip(&self.pixels) {
            image.set(x, y, color);
        }
    }
}

/// Shade every pixel of `bucket`.
pub fn render_bucket<S: SceneQuery + ?Sized>(
    bucket: &Bucket,
    frustum: &FrustumGeometry,
    scene: &S,
    lights: &[Light],
    shading: &ShadeSettings,
) -> BucketResult {
    let pixels = bucket
        .coords()
        .map(|(x, y)| render_pixel(frustum, scene, lights, x, y, shading))
        .collect();

    BucketResult::new(*bucket, pixels)
}

/// Shade all buckets on the rayon pool and assemble the image.
pub fn render_buckets<S: SceneQuery + ?Sized>(
    frustum: &FrustumGeometry,
    scene: &S,
    lights: &[Light],
    shading: &ShadeSettings,
    bucket_size: u32,
) -> ImageBuffer {
    let buckets = generate_buckets(frustum.width, frustum.height, bucket_size);
    log::debug!(
        "{} buckets of up to {bucket_size}px across {} threads",
        buckets.len(),
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, frustum, scene, lights, shading))
        .collect();

    let mut image = ImageBuffer::new(frustum.width, frustum.height);
    for result in &results {
        result.write_into(&mut image);
    }
    image
}
