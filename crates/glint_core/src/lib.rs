//! Glint Core - scene descriptions for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraSettings`,
//!   `MaterialDesc`, `SphereDesc`
//! - **JSON loading/saving** with validation
//! - **Built-in scenes**: a small demo and the random-spheres cover scene
//!
//! Descriptions are plain data; `glint_renderer` turns them into a
//! renderable world.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_scene, random_spheres};
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} spheres", scene.spheres.len());
//!
//! let cover = random_spheres(42);
//! ```

pub mod builtin;
pub mod scene;

// Re-export commonly used types
pub use builtin::{demo, random_spheres};
pub use scene::{
    load_scene, load_scene_from_str, save_scene, CameraSettings, MaterialDesc, MaterialRef,
    SceneDescription, SceneError, SceneResult, SphereDesc,
};
