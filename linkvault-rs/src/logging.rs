//! Tracing subscriber setup for the CLI.

use crate::config::LoggingConfig;
use crate::error::{Result, VaultError};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

// Keeps the non-blocking file writer flushing until the process exits.
static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Install the global subscriber: stderr at `cfg.level` (or `level_override`),
/// plus an optional log file. `RUST_LOG` directives take precedence.
pub fn init(cfg: &LoggingConfig, level_override: Option<LevelFilter>) -> Result<()> {
    let stderr_level = level_override
        .or_else(|| parse_level(&cfg.level))
        .unwrap_or(LevelFilter::WARN);

    let stderr_filter = EnvFilter::builder()
        .with_default_directive(stderr_level.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(ref path) = cfg.file else {
        return registry
            .try_init()
            .map_err(|e| VaultError::ConfigError(format!("logging: {}", e)));
    };

    let file_level = cfg
        .file_level
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(LevelFilter::DEBUG);
    let file_filter = EnvFilter::builder()
        .with_default_directive(file_level.into())
        .from_env_lossy();

    let file = File::create(path).map_err(|e| {
        VaultError::ConfigError(format!("cannot create log file {}: {}", path.display(), e))
    })?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut slot) = LOG_GUARD.lock() {
        *slot = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(file_filter);

    registry
        .with(file_layer)
        .try_init()
        .map_err(|e| VaultError::ConfigError(format!("logging: {}", e)))
}

/// Parse a level name, ignoring case.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
