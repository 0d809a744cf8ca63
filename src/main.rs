// Scanline compositor - demo entry point
//
// Renders a C64-style test screen through the configured pipeline,
// reports timing against the PAL frame budget and saves a screenshot.
//
// Environment overrides (applied on top of the config file):
//   SCANLINE_THREADS=<n>        worker threads
//   SCANLINE_SCALE=1x|2x        horizontal scale
//   SCANLINE_ENFORCE_BUDGET=1   exit with an error when a frame is too slow

use scanline_rs::config::{RenderConfig, DEFAULT_CONFIG_FILE, PAL_FRAME_HEIGHT, PAL_FRAME_WIDTH};
use scanline_rs::frame::{FrameRenderer, FrameStats};
use scanline_rs::framebuffer::IndexedFrame;
use scanline_rs::render::Scale;
use scanline_rs::screenshot::save_screenshot;
use std::env;
use std::error::Error;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Frames rendered for the timing run (one second of PAL video)
const BENCH_FRAMES: u32 = 50;

/// PAL frame interval
const FRAME_BUDGET: Duration = Duration::from_millis(20);

/// Apply `SCANLINE_THREADS` / `SCANLINE_SCALE` to a loaded config
fn apply_env_overrides(config: &mut RenderConfig) -> Result<(), Box<dyn Error>> {
    if let Ok(threads) = env::var("SCANLINE_THREADS") {
        config.threads = threads
            .trim()
            .parse()
            .map_err(|e| format!("SCANLINE_THREADS={}: {}", threads, e))?;
    }
    if let Ok(scale) = env::var("SCANLINE_SCALE") {
        config.scale = scale.parse::<Scale>()?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("Scanline compositor (scanline-rs) v0.1.0");
    println!("========================================");
    println!();

    let mut config = RenderConfig::load_or_default(DEFAULT_CONFIG_FILE);
    apply_env_overrides(&mut config)?;
    config.validate()?;
    if config.viewport.last_x >= PAL_FRAME_WIDTH || config.viewport.last_line >= PAL_FRAME_HEIGHT {
        return Err(format!(
            "viewport must fit the {}x{} test frame",
            PAL_FRAME_WIDTH, PAL_FRAME_HEIGHT
        )
        .into());
    }
    println!("Render configuration loaded from '{}'", DEFAULT_CONFIG_FILE);

    let mut renderer = FrameRenderer::from_config(&config)?;
    let mut buffer = renderer.create_buffer();
    let (width, height) = renderer.output_size();
    println!(
        "Output {}x{} ({:?}, double scan: {}, palette: {}, threads: {})",
        width, height, config.scale, config.double_scan, config.palette, config.threads
    );
    println!();

    let mut frame = IndexedFrame::new(PAL_FRAME_WIDTH, PAL_FRAME_HEIGHT);
    frame.test_pattern();

    let start = Instant::now();
    let mut stats = FrameStats::default();
    for _ in 0..BENCH_FRAMES {
        stats = renderer.render_frame(&frame, &mut buffer);
    }
    let per_frame = start.elapsed() / BENCH_FRAMES;

    println!(
        "Rendered {} frames: {} lines ({} solid), {} pixels per frame",
        BENCH_FRAMES, stats.lines, stats.solid_lines, stats.pixels
    );
    println!(
        "Average {:.3} ms per frame ({:.1}% of the {} ms budget)",
        per_frame.as_secs_f64() * 1000.0,
        per_frame.as_secs_f64() / FRAME_BUDGET.as_secs_f64() * 100.0,
        FRAME_BUDGET.as_millis()
    );

    let path = save_screenshot(&buffer, config.pixel_format, "screenshots")?;
    println!("Screenshot saved to {}", path.display());

    let enforce = env::var("SCANLINE_ENFORCE_BUDGET").is_ok_and(|v| v != "0");
    if enforce && per_frame > FRAME_BUDGET {
        return Err(format!(
            "average frame time {:.3} ms exceeds the {} ms budget",
            per_frame.as_secs_f64() * 1000.0,
            FRAME_BUDGET.as_millis()
        )
        .into());
    }

    Ok(())
}
