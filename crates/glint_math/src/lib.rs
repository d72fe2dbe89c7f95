// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color with linear channels, typically in 0-1.
pub type Color = Vec3;
