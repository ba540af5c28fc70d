use clap::{Parser, Subcommand};
use qr_badge::{config, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qr-badge")]
#[command(about = "Generate a QR code with a centered logo on a contrast plate")]
#[command(long_about = "\
Generate a QR code with a centered logo on a contrast plate

Encodes a text payload (typically a URL) at high error-correction tolerance,
pastes a logo at the center on an opaque white backing plate, and writes the
result as both a lossless PNG and a flattened JPEG.

With no flags and no config file, the stock defaults apply: the logo is read
from logo.png and the outputs are qr-menu.png and qr-menu.jpg in the current
directory.

Run 'qr-badge gen-config' for a documented qr-badge.toml.")]
#[command(version)]
struct Cli {
    /// Config file (TOML); omit to use stock defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Text payload to encode (overrides config)
    #[arg(long, global = true)]
    payload: Option<String>,

    /// Logo image path (overrides config)
    #[arg(long, global = true)]
    logo: Option<PathBuf>,

    /// Output PNG path (overrides config)
    #[arg(long, global = true)]
    out_png: Option<PathBuf>,

    /// Output JPEG path (overrides config)
    #[arg(long, global = true)]
    out_jpeg: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode, composite and write both output files
    Build,
    /// Validate configuration and inputs without writing files
    Check,
    /// Print a stock qr-badge.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build => {
            let config = resolve_config(&cli)?;
            let report = pipeline::run(&config)?;
            println!(
                "QR: {} modules per side, raster {}x{} px, logo {}x{} px at ({}, {})",
                report.modules,
                report.side,
                report.side,
                report.placement.logo_w,
                report.placement.logo_h,
                report.placement.plate_x,
                report.placement.plate_y,
            );
            println!("Done: {}", config.output.png);
        }
        Command::Check => {
            let config = resolve_config(&cli)?;
            pipeline::check(&config)?;
            println!("==> Configuration and inputs are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Merge the config file (or defaults) with CLI overrides, then validate.
fn resolve_config(cli: &Cli) -> Result<config::BadgeConfig, config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::BadgeConfig::load(path)?,
        None => config::BadgeConfig::default(),
    };

    if let Some(payload) = &cli.payload {
        config.payload = payload.clone();
    }
    if let Some(logo) = &cli.logo {
        config.logo = logo.display().to_string();
    }
    if let Some(out_png) = &cli.out_png {
        config.output.png = out_png.display().to_string();
    }
    if let Some(out_jpeg) = &cli.out_jpeg {
        config.output.jpeg = out_jpeg.display().to_string();
    }

    config.validate()?;
    Ok(config)
}
