//! Logo compositing: resize, backing plate, centered overlay.
//!
//! The geometry helpers are pure functions, testable without any I/O or
//! images. Pixel work happens in [`compose`], which consumes the QR raster
//! and returns the branded result plus a [`Placement`] describing where
//! everything landed.

use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode logo {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

/// How large the logo and its plate may grow relative to the QR raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayParams {
    /// Upper bound on either logo dimension, as a fraction of the QR side.
    pub logo_fraction: f64,
    /// Plate padding around the logo, as a fraction of the QR width.
    pub pad_fraction: f64,
    /// Plate fill. Opaque so it fully occludes the modules underneath.
    pub plate_color: Rgba<u8>,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            logo_fraction: 0.20,
            pad_fraction: 0.02,
            plate_color: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Where the overlay ended up, in pixels on the QR raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub logo_w: u32,
    pub logo_h: u32,
    pub plate_w: u32,
    pub plate_h: u32,
    pub plate_x: u32,
    pub plate_y: u32,
}

/// Largest size with the source's aspect ratio that fits within `bounds`.
///
/// Never enlarges: a source already inside the bounds comes back unchanged.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).max(1);
    let h = ((src_h as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Integer-floor centering offset for `inner` inside `outer`, one axis.
pub fn centered(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

/// Load the logo with transparency support.
///
/// A missing or undecodable file is fatal — there is no fallback image and
/// no logo-free mode.
pub fn load_logo(path: &Path) -> Result<RgbaImage, ComposeError> {
    let img = ImageReader::open(path)?
        .decode()
        .map_err(|source| ComposeError::Decode {
            path: path.display().to_string(),
            source,
        })?;
    Ok(img.to_rgba8())
}

/// Paste the logo, mounted on its backing plate, onto the center of the QR
/// raster.
///
/// The logo is shrunk (Lanczos3, aspect-preserving) so neither dimension
/// exceeds `logo_fraction` of the QR side. The plate is the resized logo
/// plus a symmetric padding ring of `pad_fraction` of the QR width. The logo
/// is composited onto the plate first, respecting the logo's own alpha, then
/// the finished plate is pasted onto the raster in a single operation.
pub fn compose(
    mut qr: RgbaImage,
    logo: &RgbaImage,
    params: &OverlayParams,
) -> (RgbaImage, Placement) {
    let (qr_w, qr_h) = qr.dimensions();
    let max_w = (qr_w as f64 * params.logo_fraction) as u32;
    let max_h = (qr_h as f64 * params.logo_fraction) as u32;

    let (logo_w, logo_h) = fit_within(logo.dimensions(), (max_w, max_h));
    let scaled;
    let logo = if (logo_w, logo_h) == logo.dimensions() {
        logo
    } else {
        scaled = imageops::resize(logo, logo_w, logo_h, FilterType::Lanczos3);
        &scaled
    };

    let pad = (qr_w as f64 * params.pad_fraction) as u32;
    let (plate_w, plate_h) = (logo_w + 2 * pad, logo_h + 2 * pad);
    let mut plate = RgbaImage::from_pixel(plate_w, plate_h, params.plate_color);
    imageops::overlay(
        &mut plate,
        logo,
        centered(plate_w, logo_w) as i64,
        centered(plate_h, logo_h) as i64,
    );

    let (plate_x, plate_y) = (centered(qr_w, plate_w), centered(qr_h, plate_h));
    imageops::overlay(&mut qr, &plate, plate_x as i64, plate_y as i64);

    (
        qr,
        Placement {
            logo_w,
            logo_h,
            plate_w,
            plate_h,
            plate_x,
            plate_y,
        },
    )
}
