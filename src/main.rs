//! ascii-sphere: a shaded sphere with an orbiting light, drawn in ASCII
//!
//! Controls:
//! - Q, Escape or Ctrl-C: Quit
//!
//! Usage:
//!   ascii-sphere                 - Animate in the terminal
//!   ascii-sphere | head -n 40    - Stream newline-terminated frames to a pipe
//!   ascii-sphere --dump debug    - Write 10 frames to ./debug/frame_NNNNN.txt

use anyhow::Context;
use ascii_sphere::{
    animation::FrameLoop,
    config::AppConfig,
    renderer::Renderer,
    terminal::{spawn_input_watcher, StopSignal, StreamDisplay, TerminalDisplay},
};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, BufWriter, IsTerminal};
use std::path::{Path, PathBuf};

/// Frames written by dump mode unless `--frames` says otherwise
const DUMP_FRAMES: u64 = 10;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii-sphere")]
#[command(version)]
#[command(about = "Animated ASCII rendering of a shaded sphere")]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short, long)]
    frames: Option<u64>,

    /// Index of the first frame
    #[arg(long)]
    start: Option<u64>,

    /// Cap the frame rate
    #[arg(long, value_name = "FPS")]
    fps: Option<u32>,

    /// Shade rows on the calling thread instead of the rayon pool
    #[arg(long)]
    sequential: bool,

    /// Write frames as text files into DIR instead of animating
    #[arg(long, value_name = "DIR")]
    dump: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    // Logs go to stderr so stdout carries only frames
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(frames) = cli.frames {
        config.animation.frames = frames;
    } else if cli.dump.is_some() {
        config.animation.frames = config.animation.frames.min(DUMP_FRAMES);
    }
    if let Some(start) = cli.start {
        config.animation.start_frame = start;
    }
    if cli.fps.is_some() {
        config.animation.max_fps = cli.fps;
    }
    if cli.sequential {
        config.animation.parallel = false;
    }

    config.validate().context("Invalid configuration")?;

    tracing::info!(
        frames = config.animation.frames,
        start_frame = config.animation.start_frame,
        max_fps = ?config.animation.max_fps,
        parallel = config.animation.parallel,
        "configuration loaded"
    );

    let renderer = Renderer::default().with_parallel(config.animation.parallel);

    match cli.dump {
        Some(dir) => run_dump(&renderer, &config, &dir),
        None => run_interactive(renderer, &config),
    }
}

fn run_interactive(renderer: Renderer, config: &AppConfig) -> anyhow::Result<()> {
    let stop = StopSignal::new();
    let mut frame_loop = FrameLoop::new(
        renderer,
        config.animation.frame_range(),
        config.animation.max_fps,
    );

    let summary = if !io::stdout().is_terminal() {
        // Piped or redirected: plain newline-terminated rows, no raw mode
        let mut display = StreamDisplay::new(BufWriter::new(io::stdout()));
        frame_loop
            .run(&mut display, &stop)
            .context("Failed to write frame")?
    } else {
        let mut display = TerminalDisplay::new().context("Failed to initialize terminal")?;
        let watcher = spawn_input_watcher(stop.clone());

        let result = frame_loop.run(&mut display, &stop);

        stop.stop();
        if watcher.join().is_err() {
            tracing::warn!("input watcher panicked");
        }
        result.context("Failed to draw frame")?
    };

    tracing::info!(
        frames = summary.frames_rendered,
        elapsed = ?summary.elapsed,
        "done"
    );
    Ok(())
}

/// Render frames to `DIR/frame_NNNNN.txt` for inspection
fn run_dump(renderer: &Renderer, config: &AppConfig, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create dump directory {}", dir.display()))?;

    for index in config.animation.frame_range() {
        let frame = renderer.render(index);
        let path = dir.join(format!("frame_{:05}.txt", index));
        fs::write(&path, frame.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("wrote {}", path.display());
    }

    tracing::info!(
        frames = config.animation.frames,
        dir = %dir.display(),
        "frames dumped"
    );
    Ok(())
}
