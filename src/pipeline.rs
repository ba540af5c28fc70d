//! High-level pipeline: encode → rasterize → compose → write.
//!
//! [`run`] is the whole tool; [`check`] performs every stage except the
//! writes, so configuration and inputs can be validated without touching the
//! output paths.

use crate::compose::{self, ComposeError, OverlayParams, Placement};
use crate::config::BadgeConfig;
use crate::encode::{self, EncodeError, RasterStyle};
use crate::writer::{self, Quality, WriteError};
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// What one run produced, for the CLI summary and tests.
#[derive(Debug, Clone, Copy)]
pub struct BadgeReport {
    /// Modules per side of the encoded matrix (quiet zone excluded).
    pub modules: u32,
    /// Pixel side length of the square output raster.
    pub side: u32,
    /// Where the plate and logo landed.
    pub placement: Placement,
}

/// Run the full pipeline and write both output files.
///
/// The payload is encoded and the logo loaded before anything is written, so
/// a capacity error or a missing logo leaves the output paths untouched.
pub fn run(config: &BadgeConfig) -> Result<BadgeReport, PipelineError> {
    let (img, report) = build_image(config)?;
    writer::write_png(Path::new(&config.output.png), &img)?;
    writer::write_jpeg(
        Path::new(&config.output.jpeg),
        &img,
        Quality::new(config.output.quality),
    )?;
    Ok(report)
}

/// Run every stage except the writes.
pub fn check(config: &BadgeConfig) -> Result<BadgeReport, PipelineError> {
    let (_, report) = build_image(config)?;
    Ok(report)
}

fn build_image(config: &BadgeConfig) -> Result<(RgbaImage, BadgeReport), PipelineError> {
    let code = encode::encode(&config.payload, config.qr.tolerance, config.qr.version)?;
    let modules = code.width() as u32;

    let style = RasterStyle {
        module_size: config.qr.module_size,
        border: config.qr.border,
        ..RasterStyle::default()
    };
    let raster = encode::rasterize(&code, &style);

    let logo = compose::load_logo(Path::new(&config.logo))?;
    let params = OverlayParams {
        logo_fraction: config.overlay.logo_fraction,
        pad_fraction: config.overlay.pad_fraction,
        ..OverlayParams::default()
    };
    let (img, placement) = compose::compose(raster, &logo, &params);

    let side = img.width();
    Ok((
        img,
        BadgeReport {
            modules,
            side,
            placement,
        },
    ))
}
