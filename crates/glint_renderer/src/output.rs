//! Image buffer and PNG output.

use glint_math::{Color, Interval};
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting a render.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Invalid output path: {0}")]
    InvalidPath(PathBuf),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Linear color buffer filled by the render driver.
///
/// Pixel `(x, y)` follows texture addressing: `y = 0` is the bottom row.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes, top row first (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&color_to_rgba(self.get(x, y)));
            }
        }
        bytes
    }

    /// Convert to an `image` crate buffer.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, row| {
            image::Rgba(color_to_rgba(self.get(x, self.height - 1 - row)))
        })
    }
}

/// Convert a linear color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let quantize = |c: f32| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

/// Encode `image` as PNG and write it to `path`.
///
/// The PNG is written to a hidden sibling file first and renamed into place,
/// so `path` never holds a partial image.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| OutputError::InvalidPath(path.to_path_buf()))?;
    let staging = path.with_file_name(format!(".{file_name}.partial"));

    let written = image
        .to_rgba_image()
        .save_with_format(&staging, ImageFormat::Png)
        .map_err(OutputError::from)
        .and_then(|()| fs::rename(&staging, path).map_err(OutputError::from));

    if written.is_err() {
        // Best effort; report the encode error
        let _ = fs::remove_file(&staging);
    }
    written?;

    log::info!(
        "Saved {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(0.8, 0.2, 0.2)), [204, 51, 51, 255]);
        assert_eq!(color_to_rgba(Color::new(-1.0, 2.0, 0.25)), [0, 255, 64, 255]);
    }

    #[test]
    fn test_to_rgba_puts_top_row_first() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 1, Color::ONE); // top-left
        image.set(1, 0, Color::X); // bottom-right

        let bytes = image.to_rgba();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &[255, 255, 255, 255]);
        assert_eq!(&bytes[12..16], &[255, 0, 0, 255]);

        let rgba = image.to_rgba_image();
        assert_eq!(rgba.into_raw(), bytes);
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.png");

        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.8, 0.2, 0.2));
        save_png(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 0).0, [204, 51, 51, 255]);

        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_save_png_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("render.png");

        let result = save_png(&ImageBuffer::new(1, 1), &path);
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
