//! Tracing subscriber setup.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Install the global subscriber described by `config`.
///
/// Output goes to the configured file only; the terminal is owned by the UI.
/// `RUST_LOG` takes precedence over the configured filter. If a global
/// subscriber is already installed this returns [`LoggingError::Install`],
/// which callers may treat as non-fatal.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let Some(path) = &config.file else {
        return Ok(());
    };

    let file = File::create(path).map_err(|e| LoggingError::FileCreate {
        path: path.clone(),
        source: e,
    })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(LoggingError::Install)
}
