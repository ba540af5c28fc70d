//! Tool configuration module.
//!
//! Handles loading and validating an optional `qr-badge.toml`. With no file,
//! stock defaults produce a print-ready menu code; a config file is sparse
//! and overrides only the values it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! payload = "https://banhmyxoingoc.nguyenvanhan.io.vn/menu"
//! logo = "logo.png"         # Logo image, loaded with transparency support
//!
//! [qr]
//! tolerance = "high"        # low | medium | quartile | high (~7/15/25/30% recovery)
//! module_size = 20          # Pixels per module
//! border = 4                # Quiet-zone width in modules
//! # version = 5             # Fix the symbol version (1-40); omit for auto-fit
//!
//! [overlay]
//! logo_fraction = 0.2       # Max logo dimension as a fraction of the QR side
//! pad_fraction = 0.02       # Plate padding as a fraction of the QR width
//!
//! [output]
//! png = "qr-menu.png"       # Lossless, keeps transparency
//! jpeg = "qr-menu.jpg"      # Flattened to RGB
//! quality = 95              # JPEG quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::encode::Tolerance;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full tool configuration.
///
/// All fields have stock defaults; config files need only specify the
/// values they want to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BadgeConfig {
    /// Text payload to encode, typically a URL.
    pub payload: String,
    /// Path to the logo image.
    pub logo: String,
    /// QR encoding and rasterization settings.
    pub qr: QrConfig,
    /// Logo overlay settings.
    pub overlay: OverlayConfig,
    /// Output file settings.
    pub output: OutputConfig,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            payload: "https://banhmyxoingoc.nguyenvanhan.io.vn/menu".to_string(),
            logo: "logo.png".to_string(),
            qr: QrConfig::default(),
            overlay: OverlayConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// QR encoding and rasterization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrConfig {
    /// Error-correction tolerance. High keeps the code scannable under the
    /// center logo.
    pub tolerance: Tolerance,
    /// Fixed symbol version (1-40), or `None` for the smallest that fits.
    pub version: Option<i16>,
    /// Pixels per module.
    pub module_size: u32,
    /// Quiet-zone width in modules.
    pub border: u32,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::High,
            version: None,
            module_size: 20,
            border: 4,
        }
    }
}

/// Logo overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Upper bound on either logo dimension, as a fraction of the QR side.
    pub logo_fraction: f64,
    /// Plate padding around the logo, as a fraction of the QR width.
    pub pad_fraction: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            logo_fraction: 0.20,
            pad_fraction: 0.02,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Lossless output path (PNG, keeps transparency).
    pub png: String,
    /// Lossy output path (JPEG, flattened to RGB).
    pub jpeg: String,
    /// JPEG quality (1-100).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            png: "qr-menu.png".to_string(),
            jpeg: "qr-menu.jpg".to_string(),
            quality: 95,
        }
    }
}

impl BadgeConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. Called after loading and after CLI overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payload.is_empty() {
            return Err(ConfigError::Validation("payload must not be empty".into()));
        }
        if self.qr.module_size == 0 {
            return Err(ConfigError::Validation(
                "qr.module_size must be at least 1".into(),
            ));
        }
        if let Some(v) = self.qr.version {
            if !(1..=40).contains(&v) {
                return Err(ConfigError::Validation(format!(
                    "qr.version must be between 1 and 40, got {v}"
                )));
            }
        }
        if self.overlay.logo_fraction <= 0.0 || self.overlay.logo_fraction > 0.5 {
            return Err(ConfigError::Validation(format!(
                "overlay.logo_fraction must be in (0, 0.5], got {}",
                self.overlay.logo_fraction
            )));
        }
        if self.overlay.pad_fraction < 0.0 || self.overlay.pad_fraction > 0.25 {
            return Err(ConfigError::Validation(format!(
                "overlay.pad_fraction must be in [0, 0.25], got {}",
                self.overlay.pad_fraction
            )));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(format!(
                "output.quality must be between 1 and 100, got {}",
                self.output.quality
            )));
        }
        Ok(())
    }
}

/// A documented stock config file, printed by `qr-badge gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# qr-badge configuration. All options are optional - defaults shown below.

payload = "https://banhmyxoingoc.nguyenvanhan.io.vn/menu"
logo = "logo.png"         # Logo image, loaded with transparency support

[qr]
tolerance = "high"        # low | medium | quartile | high (~7/15/25/30% recovery)
module_size = 20          # Pixels per module
border = 4                # Quiet-zone width in modules
# version = 5             # Fix the symbol version (1-40); omit for auto-fit

[overlay]
logo_fraction = 0.2       # Max logo dimension as a fraction of the QR side
pad_fraction = 0.02       # Plate padding as a fraction of the QR width

[output]
png = "qr-menu.png"       # Lossless, keeps transparency
jpeg = "qr-menu.jpg"      # Flattened to RGB
quality = 95              # JPEG quality (1-100)
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_defaults() {
        let config = BadgeConfig::default();
        assert_eq!(config.qr.tolerance, Tolerance::High);
        assert_eq!(config.qr.version, None);
        assert_eq!(config.qr.module_size, 20);
        assert_eq!(config.qr.border, 4);
        assert_eq!(config.overlay.logo_fraction, 0.20);
        assert_eq!(config.overlay.pad_fraction, 0.02);
        assert_eq!(config.output.quality, 95);
        assert_eq!(config.logo, "logo.png");
    }

    #[test]
    fn sparse_config_overrides_only_named_values() {
        let config: BadgeConfig = toml::from_str(
            r#"
            payload = "https://example.com/menu"

            [qr]
            module_size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.payload, "https://example.com/menu");
        assert_eq!(config.qr.module_size, 10);
        // Everything else keeps its default.
        assert_eq!(config.qr.border, 4);
        assert_eq!(config.output.quality, 95);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<BadgeConfig, _> = toml::from_str("boarder = 4");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_keys_are_rejected() {
        let result: Result<BadgeConfig, _> = toml::from_str("[qr]\nbox_size = 20");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BadgeConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BadgeConfig::default());
    }

    #[test]
    fn load_reads_and_validates() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("qr-badge.toml");
        std::fs::write(&path, "[overlay]\nlogo_fraction = 0.9").unwrap();

        let result = BadgeConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = BadgeConfig::load(Path::new("/nonexistent/qr-badge.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn validate_rejects_empty_payload() {
        let config = BadgeConfig {
            payload: String::new(),
            ..BadgeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_module_size() {
        let mut config = BadgeConfig::default();
        config.qr.module_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_version() {
        let mut config = BadgeConfig::default();
        config.qr.version = Some(41);
        assert!(config.validate().is_err());
        config.qr.version = Some(40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_quality() {
        let mut config = BadgeConfig::default();
        config.output.quality = 0;
        assert!(config.validate().is_err());
        config.output.quality = 101;
        assert!(config.validate().is_err());
    }
}
