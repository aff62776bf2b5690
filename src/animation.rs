//! The frame loop
//!
//! Renders a range of frames into a [`Display`], checking the stop signal
//! before every frame and optionally holding each frame for a minimum time.

use std::io;
use std::ops::Range;
use std::thread;
use std::time::{Duration, Instant};

use crate::renderer::Renderer;
use crate::terminal::{Display, StopSignal};

/// Outcome of a frame loop run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames_rendered: u64,
    pub stopped_early: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn frames_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames_rendered as f64 / secs
        } else {
            0.0
        }
    }
}

/// Sleeps out whatever is left of each frame's time budget
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    frame_time: Duration,
}

impl Pacer {
    pub fn new(max_fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs(1) / max_fps.max(1),
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// Block until a full frame time has passed since `frame_start`
    pub fn finish_frame(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame_time {
            thread::sleep(self.frame_time - elapsed);
        }
    }
}

/// Drives a [`Renderer`] over a range of frame indices into a [`Display`]
pub struct FrameLoop {
    renderer: Renderer,
    frames: Range<u64>,
    pacer: Option<Pacer>,
}

impl FrameLoop {
    pub fn new(renderer: Renderer, frames: Range<u64>, max_fps: Option<u32>) -> Self {
        Self {
            renderer,
            frames,
            pacer: max_fps.map(Pacer::new),
        }
    }

    /// Draw every frame in the range, or until `stop` is raised.
    ///
    /// A broken pipe on the display ends the run like a stop request; any
    /// other write error is returned.
    pub fn run<D: Display>(&mut self, display: &mut D, stop: &StopSignal) -> io::Result<RunSummary> {
        let started = Instant::now();
        let mut frames_rendered = 0;
        let mut stopped_early = false;

        for index in self.frames.clone() {
            if stop.is_stopped() {
                stopped_early = true;
                break;
            }

            let frame_start = Instant::now();
            let frame = self.renderer.render(index);

            match draw(display, frame.rows()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("display closed at frame {}", index);
                    stopped_early = true;
                    break;
                }
                Err(e) => return Err(e),
            }

            frames_rendered += 1;
            tracing::trace!(frame = index, elapsed = ?frame_start.elapsed(), "frame drawn");

            if let Some(pacer) = self.pacer.as_ref() {
                pacer.finish_frame(frame_start);
            }
        }

        let summary = RunSummary {
            frames_rendered,
            stopped_early,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            frames = summary.frames_rendered,
            stopped_early = summary.stopped_early,
            fps = %format!("{:.1}", summary.frames_per_second()),
            "animation finished"
        );
        Ok(summary)
    }
}

fn draw<D: Display>(display: &mut D, rows: &[String]) -> io::Result<()> {
    display.clear()?;
    for row in rows {
        display.write_line(row)?;
    }
    display.present()
}
