//! Core raycasting renderer.
//!
//! One primary ray per pixel:
//! - Nearest-hit search over every sphere and plane
//! - Local shading from all lights (no secondary bounces)
//! - Solid background for rays that escape

use std::time::Instant;

use beam_core::{Color, Scene};
use beam_math::{Interval, Ray};
use thiserror::Error;

use crate::{bucket::DEFAULT_BUCKET_ROWS, intersect::nearest_hit, shading::shade, Camera};

/// Phong exponent used for specular highlights.
pub const DEFAULT_SHININESS: f32 = 20.0;

/// Offset along the surface normal for shadow ray origins, per unit of
/// hit point magnitude (never scaled below 1).
pub const DEFAULT_SHADOW_BIAS: f32 = 1e-4;

/// Errors that can occur while rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height}, both must be positive")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Specular exponent
    pub shininess: f32,
    /// Shadow ray origin offset along the surface normal
    pub shadow_bias: f32,
    /// Rows per bucket for parallel rendering
    pub bucket_rows: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            shininess: DEFAULT_SHININESS,
            shadow_bias: DEFAULT_SHADOW_BIAS,
            bucket_rows: DEFAULT_BUCKET_ROWS,
        }
    }
}

/// Clamp each channel to [0, 1].
#[inline]
pub(crate) fn clamp_color(color: Color) -> Color {
    let unit = Interval::UNIT;
    Color::new(unit.clamp(color.x), unit.clamp(color.y), unit.clamp(color.z))
}

/// Compute the color seen by a primary ray.
pub fn trace(ray: &Ray, scene: &Scene, config: &RenderConfig) -> Color {
    let Some(hit) = nearest_hit(ray, scene, Interval::POSITIVE) else {
        return clamp_color(config.background);
    };

    match scene.objects()[hit.index].material() {
        Some(material) => shade(&hit, -ray.direction(), material, scene, config),
        None => clamp_color(config.background),
    }
}

/// Render a single pixel.
pub fn render_pixel(camera: &Camera, scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let ray = camera.get_ray(x, y);
    trace(&ray, scene, config)
}

/// Row-major image of linear colors, row 0 at the top.
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
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Render the entire scene to an image buffer.
///
/// This is the single-threaded reference path; see `render_parallel`
/// for the bucketed version, which produces identical output.
pub fn render(scene: &Scene, width: u32, height: u32, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    check_dimensions(width, height)?;

    let start = Instant::now();
    let camera = Camera::from_scene(scene, width, height);
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(&camera, scene, x, y, config);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered {}x{} in {:?}", width, height, start.elapsed());
    Ok(image)
}
