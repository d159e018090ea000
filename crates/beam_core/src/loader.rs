//! JSON scene loading.
//!
//! A scene file is a JSON array of records, each tagged with a `"type"`
//! of `camera`, `sphere`, `plane` or `light`:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 0, -5], "radius": 1,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1] },
//!   { "type": "light", "position": [1, 3, 0], "color": [2, 2, 2],
//!     "theta": 0, "radial-a0": 1, "radial-a1": 0.1, "radial-a2": 0.01 }
//! ]
//! ```
//!
//! Records without a type, with an unknown type, or missing required
//! fields become [`Object::Empty`] so one bad record never aborts a load.

use std::path::Path;

use beam_math::Vec3;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::scene::{CameraSpec, Light, Material, Object, Plane, Scene, SceneError, Sphere};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Camera(CameraRecord),
    Sphere(SphereRecord),
    Plane(PlaneRecord),
    Light(LightRecord),
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug)]
struct CameraRecord {
    width: f32,
    height: f32,
}

#[derive(Deserialize, Debug)]
struct SphereRecord {
    position: [f32; 3],
    radius: f32,
    #[serde(default)]
    color: Option<[f32; 3]>,
    #[serde(default, alias = "diffuse-color")]
    diffuse_color: Option<[f32; 3]>,
    #[serde(default, alias = "specular-color")]
    specular_color: Option<[f32; 3]>,
}

#[derive(Deserialize, Debug)]
struct PlaneRecord {
    position: [f32; 3],
    normal: [f32; 3],
    #[serde(default)]
    color: Option<[f32; 3]>,
    #[serde(default, alias = "diffuse-color")]
    diffuse_color: Option<[f32; 3]>,
    #[serde(default, alias = "specular-color")]
    specular_color: Option<[f32; 3]>,
}

fn one() -> f32 {
    1.0
}

#[derive(Deserialize, Debug)]
struct LightRecord {
    position: [f32; 3],
    color: [f32; 3],
    #[serde(default)]
    direction: [f32; 3],
    #[serde(default)]
    theta: f32,
    #[serde(default = "one", rename = "radial-a0", alias = "radial_a0")]
    radial_a0: f32,
    #[serde(default, rename = "radial-a1", alias = "radial_a1")]
    radial_a1: f32,
    #[serde(default, rename = "radial-a2", alias = "radial_a2")]
    radial_a2: f32,
    #[serde(default, rename = "angular-a0", alias = "angular_a0")]
    angular_a0: f32,
}

fn material(
    diffuse: Option<[f32; 3]>,
    fallback: Option<[f32; 3]>,
    specular: Option<[f32; 3]>,
) -> Material {
    let diffuse = diffuse.or(fallback).unwrap_or_default();
    let specular = specular.unwrap_or_default();
    Material::new(Vec3::from_array(diffuse), Vec3::from_array(specular))
}

impl Record {
    fn into_object(self) -> Object {
        match self {
            Record::Camera(c) => Object::Camera(CameraSpec::new(c.width, c.height)),
            Record::Sphere(s) => Object::Sphere(Sphere::new(
                Vec3::from_array(s.position),
                s.radius,
                material(s.diffuse_color, s.color, s.specular_color),
            )),
            Record::Plane(p) => Object::Plane(Plane::new(
                Vec3::from_array(p.position),
                Vec3::from_array(p.normal),
                material(p.diffuse_color, p.color, p.specular_color),
            )),
            Record::Light(l) => Object::Light(Light {
                position: Vec3::from_array(l.position),
                color: Vec3::from_array(l.color),
                direction: Vec3::from_array(l.direction),
                theta: l.theta,
                radial_a0: l.radial_a0,
                radial_a1: l.radial_a1,
                radial_a2: l.radial_a2,
                angular_a0: l.angular_a0,
            }),
            Record::Unknown => Object::Empty,
        }
    }
}

/// Convert one JSON record, degrading to `Object::Empty` on bad input.
fn parse_record(index: usize, value: Value) -> Object {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned);

    let Some(kind) = kind else {
        log::debug!("Record {} has no type, treating as empty", index);
        return Object::Empty;
    };

    match serde_json::from_value::<Record>(value) {
        Ok(Record::Unknown) => {
            log::debug!("Record {} has unknown type '{}', treating as empty", index, kind);
            Object::Empty
        }
        Ok(record) => record.into_object(),
        Err(e) => {
            log::warn!("Record {} ({}) is malformed: {}", index, kind, e);
            Object::Empty
        }
    }
}

/// Load a scene from JSON text.
pub fn load_scene_from_str(text: &str) -> LoadResult<Scene> {
    let records: Vec<Value> = serde_json::from_str(text)?;

    let objects: Vec<Object> = records
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_record(i, value))
        .collect();

    let scene = Scene::from_objects(objects)?;
    log::debug!(
        "Parsed {} objects ({} surfaces, {} lights)",
        scene.len(),
        scene.surface_count(),
        scene.lights().count()
    );
    Ok(scene)
}

/// Load a scene from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    load_scene_from_str(&text)
}
