//! Image output.
//!
//! Colors are quantized linearly to 8 bits (no gamma). `.ppm`/`.pnm`
//! paths are written as PPM, binary (P6) or ASCII (P3); any other
//! extension is handed to the `image` crate's format detection.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use beam_core::Color;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, Rgb, RgbImage};
use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// PPM sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PpmEncoding {
    /// P6
    #[default]
    Binary,
    /// P3
    Ascii,
}

/// Convert a linear color to 8-bit RGB, clamping to [0, 1] first.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

impl ImageBuffer {
    /// Convert to packed RGB bytes, row-major from the top row.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb8(*color));
        }
        bytes
    }

    /// Convert to an `image` crate buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(color_to_rgb8(self.get(x, y))))
    }
}

/// Write `image` as PPM to `writer`.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: W, encoding: PpmEncoding) -> OutputResult<()> {
    let samples = match encoding {
        PpmEncoding::Binary => SampleEncoding::Binary,
        PpmEncoding::Ascii => SampleEncoding::Ascii,
    };

    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Pixmap(samples))
        .write_image(&image.to_rgb8(), image.width, image.height, ColorType::Rgb8)?;
    Ok(())
}

fn is_ppm_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ppm") || ext.eq_ignore_ascii_case("pnm"))
        .unwrap_or(false)
}

/// Save `image` to `path`.
///
/// `encoding` only applies to PPM output.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>, encoding: PpmEncoding) -> OutputResult<()> {
    let path = path.as_ref();

    if is_ppm_path(path) {
        let mut writer = BufWriter::new(File::create(path)?);
        write_ppm(image, &mut writer, encoding)?;
        writer.flush()?;
    } else {
        image.to_rgb_image().save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
