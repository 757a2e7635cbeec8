//! Tunables for the turn engine, read from `ENGINE_*` environment variables.

use std::env;

use crate::domain::STEP_BUFFER_MS;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Padding between consecutive steps, in milliseconds.
    pub step_buffer_ms: u64,
    /// Step bin a freshly initialized game starts on.
    pub initial_step: String,
    /// Character assigned to gamers seated without one.
    pub default_character: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_buffer_ms: STEP_BUFFER_MS,
            initial_step: "1".to_string(),
            default_character: "3".to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any `ENGINE_*` variables that are set.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("ENGINE_STEP_BUFFER_MS") {
            config.step_buffer_ms = raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "ENGINE_STEP_BUFFER_MS must be a whole number of milliseconds, got '{raw}'"
                ))
            })?;
        }
        if let Some(step) = non_empty_var("ENGINE_INITIAL_STEP") {
            config.initial_step = step;
        }
        if let Some(character) = non_empty_var("ENGINE_DEFAULT_CHARACTER") {
            config.default_character = character;
        }
        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
