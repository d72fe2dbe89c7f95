//! Glint Core - Scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Camera`, `Light`, `Material`, `Shape`
//! - **Render settings**: resolution, shadow hardness, frustum mode
//! - **Scene files**: JSON loading and validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/red_wall.json")?;
//! println!("Loaded {}: {} shapes, {} lights",
//!     scene.name,
//!     scene.shape_count(),
//!     scene.lights.len());
//! ```

pub mod camera;
pub mod light;
pub mod loader;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use camera::{Camera, CameraError};
pub use light::{Light, LightKind};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{Material, Scene, Shape, Transform};
pub use settings::{FrustumMode, LightSelection, SceneSettings};
