//! # qr-badge
//!
//! Generates a QR code for a text payload (typically a URL), overlays a
//! centered logo on an opaque white backing plate, and writes the composite
//! to a lossless PNG and a lossy JPEG.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! The tool is a single forward pass through four stages:
//!
//! ```text
//! 1. Encode      payload  →  QR matrix     (smallest version that fits)
//! 2. Rasterize   matrix   →  RGBA raster   (module size + quiet zone)
//! 3. Compose     raster + logo → branded raster
//! 4. Write       raster   →  PNG + JPEG
//! ```
//!
//! No stage retries or branches: any failure aborts the run, so either both
//! output files are produced or none is.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`encode`] | Stages 1–2 — QR matrix encoding and rasterization |
//! | [`compose`] | Stage 3 — logo resize, backing plate, centered overlay |
//! | [`writer`] | Stage 4 — PNG and JPEG encoding to disk |
//! | [`pipeline`] | Glue — runs the stages and reports what was built |
//! | [`config`] | `qr-badge.toml` loading, defaults, validation |
//!
//! # Design Decisions
//!
//! ## High Error-Correction by Default
//!
//! The default tolerance is the highest standard level (~30% of modules
//! recoverable). The logo deliberately occludes the center of the code, so
//! the extra redundancy is what keeps the result scannable. Lower levels are
//! available for logo-free or capacity-constrained uses.
//!
//! ## Backing Plate Behind the Logo
//!
//! Logos often carry transparency. Pasted directly onto the code, transparent
//! regions would blend with the modules underneath and ruin local contrast.
//! The compositor first mounts the logo on an opaque white plate (logo plus a
//! small padding ring), then pastes the plate onto the code in one operation.
//!
//! ## Manual Rasterization
//!
//! The `qrcode` crate is used only for matrix encoding; pixels are drawn
//! directly into an `image::RgbaImage`. This keeps the quiet-zone width and
//! module colors fully configurable and makes the raster dimensions exact:
//! `(modules + 2 × border) × module_size` per side, always.

pub mod compose;
pub mod config;
pub mod encode;
pub mod pipeline;
pub mod writer;

pub use compose::{OverlayParams, Placement};
pub use config::BadgeConfig;
pub use encode::{RasterStyle, Tolerance};
pub use pipeline::{BadgeReport, PipelineError};
pub use writer::Quality;
