//! Engine configuration
//!
//! Loaded from JSON or built in code; validated before use so bad
//! values fail at startup instead of mid-frame.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::parallel::DEFAULT_BATCH_SIZE;

/// Driver and scheduler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Render coordinate space width in pixels
    pub width: u32,
    /// Render coordinate space height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
    /// Frame-rate cap for the run loop
    pub target_fps: f32,
    /// Objects per worker batch in the parallel update phase
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "scene_engine".into(),
            target_fps: 120.0,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document; missing fields fall back to
    /// the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| EngineError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::Config(format!(
                "window dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.target_fps > 0.0) {
            return Err(EngineError::Config(format!(
                "target_fps must be positive, got {}",
                self.target_fps
            )));
        }
        if self.batch_size == 0 {
            return Err(EngineError::Config("batch_size must be at least 1".into()));
        }
        Ok(())
    }
}
