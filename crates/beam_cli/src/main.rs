use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use beam_core::load_scene;
use beam_math::Vec3;
use beam_renderer::{render, render_parallel, save_image, PpmEncoding, RenderConfig};
use clap::Parser;

/// Raycast a JSON scene description into an image.
#[derive(Debug, Parser)]
#[command(name = "beam", author, version, about, long_about = None)]
struct Args {
    /// Width in pixels of the output image
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height in pixels of the output image
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Scene description (JSON)
    input: PathBuf,

    /// Output image (.ppm, or any format the extension names, e.g. .png)
    output: PathBuf,

    /// Write ASCII PPM (P3) instead of binary (P6)
    #[arg(long)]
    ascii: bool,

    /// Render on a single thread
    #[arg(long)]
    sequential: bool,

    /// Background color as R,G,B in [0, 1]
    #[arg(long, value_parser = parse_color, default_value = "0,0,0")]
    background: Vec3,

    /// Specular exponent
    #[arg(long, default_value_t = beam_renderer::DEFAULT_SHININESS)]
    shininess: f32,

    /// Rows per parallel render bucket
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = beam_renderer::DEFAULT_BUCKET_ROWS)]
    bucket_rows: u32,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background: self.background,
            shininess: self.shininess,
            bucket_rows: self.bucket_rows,
            ..Default::default()
        }
    }

    fn encoding(&self) -> PpmEncoding {
        if self.ascii {
            PpmEncoding::Ascii
        } else {
            PpmEncoding::Binary
        }
    }
}

/// Parse "r,g,b" into a color.
fn parse_color(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{}'", s));
    }

    let mut rgb = [0.0f32; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts) {
        *channel = part
            .parse::<f32>()
            .map_err(|_| format!("invalid color component '{}'", part))?;
    }
    Ok(Vec3::from_array(rgb))
}

fn run(args: &Args) -> Result<()> {
    let scene = load_scene(&args.input)
        .with_context(|| format!("Failed to load scene {}", args.input.display()))?;

    log::info!("- NUMBER OF OBJECTS: {} -", scene.len());
    for object in &scene {
        log::info!("\n{}", object);
    }

    let config = args.render_config();
    let start = Instant::now();
    let image = if args.sequential {
        render(&scene, args.width, args.height, &config)?
    } else {
        render_parallel(&scene, args.width, args.height, &config)?
    };
    log::debug!("Render pass took {:?}", start.elapsed());

    save_image(&image, &args.output, args.encoding())
        .with_context(|| format!("Failed to write image {}", args.output.display()))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    run(&args)
}
