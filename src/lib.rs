//! ASCII sphere animation
//!
//! Renders a shaded sphere resting above a floor, lit by a light that orbits
//! the scene, as a 40x40 grid of ASCII glyphs printed to the terminal frame by
//! frame. Every glyph is a pure function of its grid cell and the frame index.

pub mod animation;
pub mod config;
pub mod renderer;
pub mod scene;
pub mod shader;
pub mod terminal;

pub use animation::{FrameLoop, RunSummary};
pub use config::AppConfig;
pub use renderer::{Frame, Renderer};
pub use scene::Scene;
pub use shader::{glyph_for, shade, Sample, Shader};
pub use terminal::{BufferDisplay, Display, StopSignal, StreamDisplay, TerminalDisplay};

/// Number of rows and columns in the shading grid
pub const GRID_SIZE: usize = 40;

/// Each glyph is repeated this many times across a row to offset the
/// terminal's tall character cells
pub const HORIZONTAL_SCALE: usize = 2;

/// Glyph ramp from darkest to brightest
pub const GLYPHS: [char; 12] = [' ', '.', ',', ':', ';', '<', 'i', 'I', 'E', 'X', '%', '@'];

/// Frames rendered when nothing else is configured
pub const DEFAULT_FRAMES: u64 = 100_000;
