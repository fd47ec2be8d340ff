//! Editor settings, loadable from a JSON file
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default distance moved by one translate key press
pub const DEFAULT_TRANSLATE_STEP: f32 = 0.25;

/// Default rotation per key press, in degrees
pub const DEFAULT_ROTATE_STEP_DEGREES: f32 = 15.0;

/// Default factor applied by one scale-up key press
pub const DEFAULT_SCALE_FACTOR: f32 = 1.25;

/// Default number of undo entries kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Default frame rate of the render loop
pub const DEFAULT_TARGET_FPS: u32 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Step sizes and limits for an editing session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub translate_step: f32,
    pub rotate_step_degrees: f32,
    /// Scale-down presses use the reciprocal
    pub scale_factor: f32,
    /// `None` keeps every entry
    pub history_limit: Option<usize>,
    pub target_fps: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            translate_step: DEFAULT_TRANSLATE_STEP,
            rotate_step_degrees: DEFAULT_ROTATE_STEP_DEGREES,
            scale_factor: DEFAULT_SCALE_FACTOR,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the editor cannot run with.
    ///
    /// A non-positive scale factor is left alone: the resulting scale
    /// transforms degrade to noops and say so in the status line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".into()));
        }
        if !self.translate_step.is_finite() || !self.rotate_step_degrees.is_finite() {
            return Err(ConfigError::Invalid("step sizes must be finite".into()));
        }
        Ok(())
    }

    pub fn rotate_step(&self) -> f32 {
        self.rotate_step_degrees.to_radians()
    }
}
