//! Frame assembly
//!
//! Shades every cell of the grid for one frame and lays the glyphs out as
//! terminal rows.

use std::fmt;

use rayon::prelude::*;

use crate::shader::Shader;
use crate::{GRID_SIZE, HORIZONTAL_SCALE};

/// One rendered frame: `GRID_SIZE` rows of `GRID_SIZE * HORIZONTAL_SCALE` glyphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    index: u64,
    rows: Vec<String>,
}

impl Frame {
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Renders frames from a shader
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    shader: Shader,
    parallel: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Shader::default())
    }
}

impl Renderer {
    pub fn new(shader: Shader) -> Self {
        Self {
            shader,
            parallel: true,
        }
    }

    /// Shade rows on the rayon pool (the default) or on the calling thread
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Render frame `index`
    pub fn render(&self, index: u64) -> Frame {
        let rows: Vec<String> = if self.parallel {
            (0..GRID_SIZE)
                .into_par_iter()
                .map(|row| self.render_row(row, index))
                .collect()
        } else {
            (0..GRID_SIZE).map(|row| self.render_row(row, index)).collect()
        };

        Frame { index, rows }
    }

    fn render_row(&self, row: usize, frame: u64) -> String {
        let mut line = String::with_capacity(GRID_SIZE * HORIZONTAL_SCALE);
        for col in 0..GRID_SIZE {
            let glyph = self.shader.shade(row, col, frame);
            for _ in 0..HORIZONTAL_SCALE {
                line.push(glyph);
            }
        }
        line
    }
}
