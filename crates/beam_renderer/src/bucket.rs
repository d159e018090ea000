//! Bucket-based parallel rendering.
//!
//! Divides the image into horizontal buckets of whole rows. Each bucket
//! owns a disjoint slice of the output buffer, so rayon workers write
//! their pixels directly without any locking.

use std::time::Instant;

use beam_core::{Color, Scene};
use rayon::prelude::*;

use crate::renderer::{check_dimensions, render_pixel, ImageBuffer, RenderConfig, RenderResult};
use crate::Camera;

/// A band of full-width rows of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First row of the bucket
    pub y: u32,
    /// Number of rows in the bucket
    pub height: u32,
    /// Index of this bucket, top to bottom
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(y: u32, height: u32, index: usize) -> Self {
        Self { y, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self, image_width: u32) -> usize {
        image_width as usize * self.height as usize
    }
}

/// Default bucket height in rows.
pub const DEFAULT_BUCKET_ROWS: u32 = 16;

/// Split `height` rows into buckets of at most `rows` rows each.
///
/// The last bucket takes whatever remains. A `rows` of 0 is treated as 1.
pub fn generate_buckets(height: u32, rows: u32) -> Vec<Bucket> {
    let rows = rows.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let bh = rows.min(height - y);
        buckets.push(Bucket::new(y, bh, buckets.len()));
        y += rows;
    }

    buckets
}

/// Render a single bucket into `pixels`, its slice of the image.
///
/// `pixels` must hold exactly `bucket.pixel_count(camera.image_width)`
/// colors in row-major order.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    pixels: &mut [Color],
) {
    let width = camera.image_width;
    debug_assert_eq!(pixels.len(), bucket.pixel_count(width));

    for (row, line) in pixels.chunks_mut(width as usize).enumerate() {
        let y = bucket.y + row as u32;
        for (x, pixel) in line.iter_mut().enumerate() {
            *pixel = render_pixel(camera, scene, x as u32, y, config);
        }
    }
}

/// Render the entire scene using all rayon worker threads.
///
/// Output is identical to the sequential `render`.
pub fn render_parallel(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    check_dimensions(width, height)?;

    let start = Instant::now();
    let camera = Camera::from_scene(scene, width, height);
    let mut image = ImageBuffer::new(width, height);

    let rows = config.bucket_rows.max(1);
    let buckets = generate_buckets(height, rows);
    log::debug!(
        "Rendering {} buckets of {} rows on {} threads",
        buckets.len(),
        rows,
        rayon::current_num_threads()
    );

    let chunk_len = width as usize * rows as usize;
    buckets
        .par_iter()
        .zip(image.pixels.par_chunks_mut(chunk_len))
        .for_each(|(bucket, pixels)| render_bucket(bucket, &camera, scene, config, pixels));

    log::info!("Rendered {}x{} in {:?}", width, height, start.elapsed());
    Ok(image)
}
