//! Configuration loading
//!
//! Settings for the frame loop, read from an optional YAML file. Every key has
//! a default, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

use crate::DEFAULT_FRAMES;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Number of frames to render
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Index of the first frame
    #[serde(default)]
    pub start_frame: u64,
    /// Optional frame-rate cap; unset renders as fast as the display allows
    #[serde(default)]
    pub max_fps: Option<u32>,
    /// Shade rows on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_frames() -> u64 {
    DEFAULT_FRAMES
}

fn default_parallel() -> bool {
    true
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            start_frame: 0,
            max_fps: None,
            parallel: default_parallel(),
        }
    }
}

impl AnimationConfig {
    /// Frame indices to render
    pub fn frame_range(&self) -> Range<u64> {
        self.start_frame..self.start_frame.saturating_add(self.frames)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when no path is given
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the frame loop cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.frames == 0 {
            return Err(ConfigError::Validation(
                "animation.frames must be at least 1".to_string(),
            ));
        }
        if self.animation.max_fps == Some(0) {
            return Err(ConfigError::Validation(
                "animation.max_fps must be at least 1 when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
