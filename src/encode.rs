//! QR matrix encoding and rasterization.
//!
//! The `qrcode` crate produces the module matrix; rasterization draws the
//! modules directly into an [`RgbaImage`] so the quiet-zone width, module
//! pixel size, and colors are all under this crate's control.

use image::{Rgba, RgbaImage};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    /// The payload does not fit the selected version at the selected
    /// tolerance (or exceeds the format's maximum capacity outright).
    #[error("QR encoding failed: {0}")]
    Capacity(#[from] QrError),
}

/// Error-correction tolerance — the fraction of modules that may be
/// unreadable (e.g. covered by a logo) while the code stays decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    /// ~7% recovery, maximum data capacity.
    Low,
    /// ~15% recovery.
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery. Required headroom for a center logo overlay.
    High,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::High
    }
}

impl Tolerance {
    fn ec_level(self) -> EcLevel {
        match self {
            Tolerance::Low => EcLevel::L,
            Tolerance::Medium => EcLevel::M,
            Tolerance::Quartile => EcLevel::Q,
            Tolerance::High => EcLevel::H,
        }
    }
}

/// Encode a payload into a QR matrix.
///
/// With `version = None` the smallest version whose capacity holds the
/// payload at the given tolerance is selected. A fixed version that is too
/// small for the payload is a hard error — no silent truncation, no
/// tolerance downgrade.
pub fn encode(
    payload: &str,
    tolerance: Tolerance,
    version: Option<i16>,
) -> Result<QrCode, EncodeError> {
    let ec = tolerance.ec_level();
    let code = match version {
        Some(v) => QrCode::with_version(payload, Version::Normal(v), ec)?,
        None => QrCode::with_error_correction_level(payload, ec)?,
    };
    Ok(code)
}

/// How to turn modules into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStyle {
    /// Pixels per module, per axis.
    pub module_size: u32,
    /// Quiet-zone width in modules, added on every side.
    pub border: u32,
    /// Dark (data) module color.
    pub dark: Rgba<u8>,
    /// Light module and quiet-zone color.
    pub light: Rgba<u8>,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self {
            module_size: 20,
            border: 4,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Draw the matrix into an RGBA raster.
///
/// The result is square with side `(modules + 2 × border) × module_size`,
/// exactly. The quiet zone is filled with the light color.
pub fn rasterize(code: &QrCode, style: &RasterStyle) -> RgbaImage {
    let modules = code.width() as u32;
    let side = (modules + 2 * style.border) * style.module_size;
    let mut img = RgbaImage::from_pixel(side, side, style.light);

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = i as u32 % modules;
        let my = i as u32 / modules;
        let px = (mx + style.border) * style.module_size;
        let py = (my + style.border) * style.module_size;
        for dy in 0..style.module_size {
            for dx in 0..style.module_size {
                img.put_pixel(px + dx, py + dy, style.dark);
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_auto_fit_picks_valid_size() {
        let code = encode("https://example.com/menu", Tolerance::High, None).unwrap();
        // Standard symbol sizes are 17 + 4 × version modules per side.
        assert_eq!((code.width() - 17) % 4, 0);
    }

    #[test]
    fn encode_auto_fit_grows_with_payload() {
        let small = encode("a", Tolerance::High, None).unwrap();
        let large = encode(&"a".repeat(200), Tolerance::High, None).unwrap();
        assert!(large.width() > small.width());
    }

    #[test]
    fn encode_fixed_version_has_fixed_size() {
        let code = encode("hello", Tolerance::Medium, Some(5)).unwrap();
        assert_eq!(code.width(), 17 + 4 * 5);
    }

    #[test]
    fn encode_fixed_version_too_small_errors() {
        // Version 1 at High holds well under 100 bytes.
        let result = encode(&"x".repeat(100), Tolerance::High, Some(1));
        assert!(matches!(result, Err(EncodeError::Capacity(_))));
    }

    #[test]
    fn encode_over_maximum_capacity_errors() {
        // Version 40 tops out below 3000 bytes even at Low.
        let result = encode(&"x".repeat(5000), Tolerance::Low, None);
        assert!(matches!(result, Err(EncodeError::Capacity(_))));
    }

    #[test]
    fn rasterize_dimensions_are_exact() {
        let code = encode("https://example.com/menu", Tolerance::High, None).unwrap();
        let modules = code.width() as u32;

        for (module_size, border) in [(1, 0), (4, 2), (20, 4)] {
            let img = rasterize(
                &code,
                &RasterStyle {
                    module_size,
                    border,
                    ..RasterStyle::default()
                },
            );
            let side = (modules + 2 * border) * module_size;
            assert_eq!(img.dimensions(), (side, side));
        }
    }

    #[test]
    fn rasterize_quiet_zone_is_light() {
        let code = encode("test", Tolerance::High, None).unwrap();
        let style = RasterStyle {
            module_size: 4,
            border: 4,
            ..RasterStyle::default()
        };
        let img = rasterize(&code, &style);

        // Every pixel in the border ring is the light color.
        let edge = style.border * style.module_size;
        for x in 0..img.width() {
            for y in [0, edge - 1, img.height() - 1] {
                assert_eq!(*img.get_pixel(x, y), style.light);
            }
        }
    }

    #[test]
    fn rasterize_contains_dark_modules() {
        let code = encode("test", Tolerance::High, None).unwrap();
        let style = RasterStyle::default();
        let img = rasterize(&code, &style);

        // The finder pattern corner is dark: first module inside the border.
        let p = style.border * style.module_size;
        assert_eq!(*img.get_pixel(p, p), style.dark);
    }

    #[test]
    fn tolerance_deserializes_from_lowercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            tolerance: Tolerance,
        }
        let w: Wrapper = toml::from_str("tolerance = \"quartile\"").unwrap();
        assert_eq!(w.tolerance, Tolerance::Quartile);
    }
}
