//! Beam Core - Scene model and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, a bounded, ordered collection of `Object`s
//!   (camera, sphere, plane, light)
//! - **JSON support**: loading scene description files into a `Scene`
//!
//! # Example
//!
//! ```ignore
//! use beam_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects, {} lights", scene.len(), scene.lights().count());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use scene::{
    CameraSpec, Color, Light, Material, Object, Plane, Scene, SceneError, SceneResult, Sphere,
    MAX_OBJECTS,
};
