use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use fbstream::cli::Cli;
use fbstream::config::{AppConfig, StreamConfig};
use fbstream::core::{Clock, FpsMeter, FramePacer};
use fbstream::shutdown::ShutdownFlag;
use fbstream::sources::{StillImage, TestPattern};
use fbstream::traits::FrameSource;
use fbstream::FramebufferDisplay;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    cli.apply(&mut config);

    let shutdown = ShutdownFlag::install().context("Failed to install signal handlers")?;

    let mut source: Box<dyn FrameSource> = match &cli.image {
        Some(path) => Box::new(StillImage::open(path)?),
        None => Box::new(TestPattern::new(
            config.stream.pattern_width,
            config.stream.pattern_height,
        )),
    };

    let mut display = FramebufferDisplay::open_config(&config.display).with_context(|| {
        format!("Failed to open framebuffer {}", config.display.device.display())
    })?;

    log::info!(
        "Streaming {} at target {} FPS. Press Ctrl+C to stop.",
        source.name(),
        config.stream.target_fps
    );

    let result = stream(&mut display, source.as_mut(), &config.stream, &shutdown, cli.frames);

    display.close();
    log::info!("Shutdown complete.");
    result
}

/// Grab, render and pace until stopped
fn stream(
    display: &mut FramebufferDisplay,
    source: &mut dyn FrameSource,
    settings: &StreamConfig,
    shutdown: &ShutdownFlag,
    max_frames: Option<u64>,
) -> Result<()> {
    let pacer = FramePacer::new(settings.target_fps);
    let mut meter = FpsMeter::new(settings.fps_report_secs);
    let mut clock = Clock::new();
    let retry_delay = Duration::from_millis(settings.retry_delay_ms);
    let mut rendered = 0u64;

    while shutdown.is_running() {
        if max_frames.is_some_and(|max| rendered >= max) {
            break;
        }

        let started = Instant::now();

        let Some(frame) = source.grab() else {
            log::warn!("failed to grab frame from {}, retrying...", source.name());
            thread::sleep(retry_delay);
            continue;
        };

        display.render(&frame).context("Failed to render frame")?;
        rendered += 1;
        meter.frame();

        if let Some(fps) = meter.tick(clock.tick()) {
            log::info!("FPS: {:.1}", fps);
        }

        if let Some(rest) = pacer.remaining(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    log::debug!("rendered {} frames", rendered);
    Ok(())
}
