//! Output encoding: lossless PNG with alpha, flattened JPEG.
//!
//! Both writers go through `File::create` + `BufWriter` + an explicit encoder
//! so failures surface as typed errors instead of panics, and nothing is
//! written when encoding fails partway.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: String,
        source: image::ImageError,
    },
}

/// JPEG encoding quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

fn encode_error(path: &Path) -> impl FnOnce(image::ImageError) -> WriteError {
    let path = path.display().to_string();
    move |source| WriteError::Encode { path, source }
}

/// Write the raster as PNG, preserving the alpha channel.
pub fn write_png(path: &Path, img: &RgbaImage) -> Result<(), WriteError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    img.write_with_encoder(encoder).map_err(encode_error(path))
}

/// Write the raster as JPEG at the given quality.
///
/// JPEG carries no alpha; the channel is dropped on conversion to RGB. The
/// composite is fully opaque by construction, so no visible blending occurs.
pub fn write_jpeg(path: &Path, img: &RgbaImage, quality: Quality) -> Result<(), WriteError> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).into_rgb8();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.value() as u8);
    rgb.write_with_encoder(encoder).map_err(encode_error(path))
}
