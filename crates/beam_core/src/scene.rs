//! Scene model for Beam.
//!
//! A scene is a flat, ordered list of objects as declared in the scene
//! file. Index order is declaration order and is significant: the first
//! camera wins, and equally-near hits resolve to the earlier object.

use std::fmt;

use beam_math::Vec3;
use thiserror::Error;

/// Color type alias (linear RGB, nominally 0-1 but not clamped here)
pub type Color = Vec3;

/// Maximum number of objects a scene can hold.
pub const MAX_OBJECTS: usize = 128;

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene holds at most {max} objects, got {count}")]
    CapacityExceeded { count: usize, max: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface colors shared by spheres and planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Lambertian reflectance (RGB)
    pub diffuse_color: Color,

    /// Highlight color (RGB)
    pub specular_color: Color,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
        }
    }
}

impl Material {
    pub fn new(diffuse_color: Color, specular_color: Color) -> Self {
        Self {
            diffuse_color,
            specular_color,
        }
    }
}

/// The view rectangle of the scene camera, in world units.
///
/// The eye sits at the world origin and looks down -Z through a view
/// plane one unit away; `width` x `height` is the size of that plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSpec {
    pub width: f32,
    pub height: f32,
}

impl CameraSpec {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if both extents are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32, material: Material) -> Self {
        Self {
            position,
            radius,
            material,
        }
    }
}

/// An infinite plane through `position` with the given normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub position: Vec3,
    pub normal: Vec3,
    pub material: Material,
}

impl Plane {
    /// Create a plane. The normal is stored as given; the renderer
    /// normalizes it before use.
    pub fn new(position: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            position,
            normal,
            material,
        }
    }
}

/// A point light or spotlight.
///
/// `theta` is the spotlight cutoff in degrees; 0 makes the light
/// omnidirectional and `direction` is then ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub direction: Vec3,
    pub theta: f32,
    pub radial_a0: f32,
    pub radial_a1: f32,
    pub radial_a2: f32,
    pub angular_a0: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            direction: Vec3::ZERO,
            theta: 0.0,
            radial_a0: 1.0,
            radial_a1: 0.0,
            radial_a2: 0.0,
            angular_a0: 0.0,
        }
    }
}

impl Light {
    /// Omnidirectional light with constant radial attenuation.
    pub fn point(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            ..Default::default()
        }
    }

    /// Spotlight aimed along `direction` with cutoff `theta` degrees.
    pub fn spot(position: Vec3, color: Color, direction: Vec3, theta: f32, angular_a0: f32) -> Self {
        Self {
            position,
            color,
            direction,
            theta,
            angular_a0,
            ..Default::default()
        }
    }

    /// Set the radial attenuation coefficients.
    pub fn with_radial(mut self, a0: f32, a1: f32, a2: f32) -> Self {
        self.radial_a0 = a0;
        self.radial_a1 = a1;
        self.radial_a2 = a2;
        self
    }

    pub fn is_spotlight(&self) -> bool {
        self.theta != 0.0
    }
}

/// One record of the scene description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Object {
    Camera(CameraSpec),
    Sphere(Sphere),
    Plane(Plane),
    Light(Light),
    /// A malformed or unrecognized record. Renders as nothing.
    Empty,
}

impl Object {
    /// Lowercase type name, as spelled in scene files.
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Camera(_) => "camera",
            Object::Sphere(_) => "sphere",
            Object::Plane(_) => "plane",
            Object::Light(_) => "light",
            Object::Empty => "empty",
        }
    }

    /// Surface colors for objects that can be hit.
    pub fn material(&self) -> Option<&Material> {
        match self {
            Object::Sphere(sphere) => Some(&sphere.material),
            Object::Plane(plane) => Some(&plane.material),
            _ => None,
        }
    }

    /// True for spheres and planes.
    pub fn is_surface(&self) -> bool {
        self.material().is_some()
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("{:.6} {:.6} {:.6}", v.x, v.y, v.z)
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Camera(camera) => {
                writeln!(f, "Type: camera")?;
                writeln!(f, "Width: {:.6}", camera.width)?;
                write!(f, "Height: {:.6}", camera.height)
            }
            Object::Sphere(sphere) => {
                writeln!(f, "Type: sphere")?;
                writeln!(f, "Position: {}", fmt_vec(sphere.position))?;
                writeln!(f, "Diffuse Color: {}", fmt_vec(sphere.material.diffuse_color))?;
                writeln!(f, "Specular Color: {}", fmt_vec(sphere.material.specular_color))?;
                write!(f, "Radius: {:.6}", sphere.radius)
            }
            Object::Plane(plane) => {
                writeln!(f, "Type: plane")?;
                writeln!(f, "Position: {}", fmt_vec(plane.position))?;
                writeln!(f, "Diffuse Color: {}", fmt_vec(plane.material.diffuse_color))?;
                writeln!(f, "Specular Color: {}", fmt_vec(plane.material.specular_color))?;
                write!(f, "Normal: {}", fmt_vec(plane.normal))
            }
            Object::Light(light) => {
                writeln!(f, "Type: light")?;
                writeln!(f, "Color: {}", fmt_vec(light.color))?;
                writeln!(f, "Position: {}", fmt_vec(light.position))?;
                writeln!(f, "Direction: {}", fmt_vec(light.direction))?;
                writeln!(f, "Theta: {:.6}", light.theta)?;
                writeln!(f, "Radial a0: {:.6}", light.radial_a0)?;
                writeln!(f, "Radial a1: {:.6}", light.radial_a1)?;
                writeln!(f, "Radial a2: {:.6}", light.radial_a2)?;
                write!(f, "Angular a0: {:.6}", light.angular_a0)
            }
            Object::Empty => {
                writeln!(f, "Type: Empty Object")?;
                write!(f, "No properties discovered")
            }
        }
    }
}

/// An ordered, capacity-bounded collection of scene objects.
///
/// Built once before rendering and only read during a render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    objects: Vec<Object>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build a scene from objects in declaration order.
    pub fn from_objects(objects: Vec<Object>) -> SceneResult<Self> {
        if objects.len() > MAX_OBJECTS {
            return Err(SceneError::CapacityExceeded {
                count: objects.len(),
                max: MAX_OBJECTS,
            });
        }
        Ok(Self { objects })
    }

    /// Append an object, failing once the scene is full.
    pub fn push(&mut self, object: Object) -> SceneResult<()> {
        if self.objects.len() >= MAX_OBJECTS {
            return Err(SceneError::CapacityExceeded {
                count: self.objects.len() + 1,
                max: MAX_OBJECTS,
            });
        }
        self.objects.push(object);
        Ok(())
    }

    /// Builder-style `push` for tests and examples.
    pub fn with(mut self, object: Object) -> SceneResult<Self> {
        self.push(object)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.objects.iter()
    }

    /// The first camera in declaration order.
    pub fn camera(&self) -> Option<&CameraSpec> {
        self.objects.iter().find_map(|object| match object {
            Object::Camera(camera) => Some(camera),
            _ => None,
        })
    }

    /// Number of camera records (only the first is used).
    pub fn camera_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object, Object::Camera(_)))
            .count()
    }

    /// All lights in declaration order.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|object| match object {
            Object::Light(light) => Some(light),
            _ => None,
        })
    }

    /// Number of spheres and planes.
    pub fn surface_count(&self) -> usize {
        self.objects.iter().filter(|object| object.is_surface()).count()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
