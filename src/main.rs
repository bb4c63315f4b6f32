use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mandelbrot_explorer::controllers::explorer::{DEFAULT_CENTER_X, DEFAULT_CENTER_Y, DEFAULT_SCALE};
use mandelbrot_explorer::{CliRenderController, PpmFilePresenter, RendererConfig, Viewport};

/// Progressive Mandelbrot renderer.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Real part of the view centre
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_CENTER_X)]
    center_x: f64,

    /// Imaginary part of the view centre
    #[arg(long, allow_hyphen_values = true, default_value_t = DEFAULT_CENTER_Y)]
    center_y: f64,

    /// Complex-plane units per device pixel
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    #[arg(long, default_value_t = 550)]
    width: i32,

    #[arg(long, default_value_t = 400)]
    height: i32,

    #[arg(long, default_value_t = 1.0)]
    device_pixel_ratio: f64,

    /// Number of refinement passes
    #[arg(long, default_value_t = 8)]
    passes: usize,

    #[arg(short, long, default_value = "output/mandelbrot.ppm")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RendererConfig::default()
        .with_pass_count(args.passes)
        .context("invalid pass count")?;
    let viewport = Viewport::new(
        args.center_x,
        args.center_y,
        args.scale,
        args.width,
        args.height,
        args.device_pixel_ratio,
    )
    .context("invalid view")?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut controller = CliRenderController::new(PpmFilePresenter::new(), config);
    controller.generate(viewport).context("render failed")?;
    controller
        .write(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
