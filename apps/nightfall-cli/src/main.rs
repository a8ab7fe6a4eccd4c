use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use nightfall_common::FrameContext;
use nightfall_starfield::{Starfield, StarfieldConfig};

#[derive(Parser)]
#[command(name = "nightfall-cli", about = "Offline starfield rendering and inspection")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and field information
    Info,
    /// Render one frame to a PNG file
    Render {
        #[arg(long, default_value = "800")]
        width: u32,

        #[arg(long, default_value = "600")]
        height: u32,

        /// Animation time in seconds baked into the frame
        #[arg(short, long, default_value = "0.0")]
        time: f32,

        /// Output path
        #[arg(short, long, default_value = "starfield.png")]
        out: String,

        /// Starfield config file (JSON)
        #[arg(long)]
        config: Option<String>,
    },
    /// Print the star accumulation and shaded color for one pixel
    Probe {
        #[arg(long, default_value = "800")]
        width: u32,

        #[arg(long, default_value = "600")]
        height: u32,

        /// Pixel column, from the left edge
        #[arg(short, long)]
        x: u32,

        /// Pixel row, from the top edge
        #[arg(short, long)]
        y: u32,

        /// Animation time in seconds
        #[arg(short, long, default_value = "0.0")]
        time: f32,

        /// Starfield config file (JSON)
        #[arg(long)]
        config: Option<String>,
    },
}

fn load_config(path: Option<&str>) -> Result<StarfieldConfig> {
    match path {
        Some(p) => StarfieldConfig::load(p).with_context(|| format!("loading config {p}")),
        None => Ok(StarfieldConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("nightfall-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("  {}", nightfall_noise::crate_info());
            println!("  {}", nightfall_starfield::crate_info());

            let config = StarfieldConfig::default();
            println!(
                "default field: {} layers ({} twinkling), base radius {}, base cell width {}",
                config.layers, config.twinkle_layers, config.base_radius, config.base_cell_width
            );
        }
        Commands::Render {
            width,
            height,
            time,
            out,
            config,
        } => {
            let field = Starfield::new(load_config(config.as_deref())?);
            let frame = FrameContext::new(width, height, time);

            let started = Instant::now();
            let framebuffer = field.render(&frame);
            tracing::debug!(elapsed = ?started.elapsed(), "frame rendered");

            let image =
                image::RgbaImage::from_vec(framebuffer.width(), framebuffer.height(), framebuffer.to_rgba8())
                    .context("framebuffer size mismatch")?;
            image
                .save(&out)
                .with_context(|| format!("writing {out}"))?;
            println!(
                "Wrote {}x{} frame at t={time} to {out}",
                framebuffer.width(),
                framebuffer.height()
            );
        }
        Commands::Probe {
            width,
            height,
            x,
            y,
            time,
            config,
        } => {
            let field = Starfield::new(load_config(config.as_deref())?);
            let frame = FrameContext::new(width, height, time);
            let uv = Vec2::new(
                (x as f32 + 0.5) / width as f32,
                (y as f32 + 0.5) / height as f32,
            );
            let pixel = frame.pixel_coords(uv);

            let stars = field.accumulate(pixel, time);
            let color = field.shade(pixel, time);
            println!("pixel ({x}, {y}) -> field coords ({:.2}, {:.2})", pixel.x, pixel.y);
            println!("star accumulation: {:.6}", stars.x);
            println!(
                "shaded color: ({:.6}, {:.6}, {:.6})",
                color.x, color.y, color.z
            );
        }
    }

    Ok(())
}
