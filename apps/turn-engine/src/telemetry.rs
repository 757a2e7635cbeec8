//! Process-wide tracing setup for hosts embedding the engine.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::AppError;

const DEFAULT_DIRECTIVES: &str = "info,reqwest=warn,hyper=warn";

/// Output shape selected by `ENGINE_LOG_FORMAT` (`json` when unset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Result<Self, AppError> {
        match std::env::var("ENGINE_LOG_FORMAT") {
            Err(_) => Ok(LogFormat::Json),
            Ok(raw) => raw.parse(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(AppError::config(format!(
                "ENGINE_LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
            ))),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Fails with a config error when a subscriber is already installed.
pub fn init_tracing() -> Result<(), AppError> {
    let format = LogFormat::from_env()?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_ansi(false))
            .try_init(),
    };
    installed.map_err(|e| AppError::config(format!("tracing subscriber already installed: {e}")))
}
