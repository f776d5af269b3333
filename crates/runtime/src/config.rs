use std::path::Path;

use cubescene_input::{ControlConfig, InputError};
use cubescene_math::MathError;
use cubescene_render::RenderConfig;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid render config: {0}")]
    Render(#[from] MathError),
    #[error(transparent)]
    Controls(#[from] InputError),
    #[error("invalid engine config: {0}")]
    Invalid(String),
}

/// Top-level configuration. Every field has a default, so a JSON file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub render: RenderConfig,
    pub controls: ControlConfig,
    /// Rate of the fixed input-integration update.
    pub fixed_update_hz: f64,
    /// Upper bound on fixed updates run in a single frame.
    pub max_catch_up_steps: u32,
    /// Number of frame times kept for FPS statistics.
    pub frame_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            controls: ControlConfig::default(),
            fixed_update_hz: 30.0,
            max_catch_up_steps: 5,
            frame_history: 120,
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.controls.validate()?;
        if !self.fixed_update_hz.is_finite() || self.fixed_update_hz <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_update_hz {} must be positive",
                self.fixed_update_hz
            )));
        }
        if self.max_catch_up_steps == 0 {
            return Err(ConfigError::Invalid("max_catch_up_steps must be at least 1".into()));
        }
        if self.frame_history == 0 {
            return Err(ConfigError::Invalid("frame_history must be at least 1".into()));
        }
        Ok(())
    }

    /// Length of one fixed update in seconds.
    pub fn fixed_step(&self) -> f64 {
        1.0 / self.fixed_update_hz
    }
}
