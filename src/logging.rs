//! Logging configuration and initialization for mcpscout.
//!
//! Provides file-based logging with rotation and optional stderr output.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Guard that must be held for the lifetime of the application.
/// When dropped, flushes any pending log writes.
#[must_use = "Dropping this guard will stop logging - keep it alive for the program's lifetime"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    _stderr_guard: Option<WorkerGuard>,
}

/// Initialize the logging subsystem based on configuration.
///
/// Returns a guard that must be kept alive for the duration of the
/// program; dropping it flushes pending writes.
pub fn init_logging(config: &LoggingConfig, root: &Path) -> Result<LoggingGuard> {
    let mut file_guard = None;
    let mut stderr_guard = None;

    let file_layer = if config.enabled {
        let log_dir = resolve_log_dir(&config.directory, root);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let appender =
            RollingFileAppender::new(parse_rotation(&config.rotation), &log_dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(parse_level(&config.level)),
        )
    } else {
        None
    };

    let stderr_layer = if config.stderr {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("mcpscout=info"));
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        stderr_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_filter(filter),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        _stderr_guard: stderr_guard,
    })
}

/// Initialize logging with defaults (for use before config is loaded).
pub fn init_early_logging() {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcpscout=info")),
        )
        .with(fmt::layer().with_target(false))
        .try_init();
}

fn resolve_log_dir(directory: &Path, root: &Path) -> PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        root.join(directory)
    }
}

fn parse_level(level: &str) -> EnvFilter {
    let directive = match level.to_lowercase().as_str() {
        "trace" => "mcpscout=trace",
        "debug" => "mcpscout=debug",
        "info" => "mcpscout=info",
        "warn" => "mcpscout=warn",
        "error" => "mcpscout=error",
        other => {
            eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", other);
            "mcpscout=info"
        }
    };
    EnvFilter::new(directive)
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        other => {
            eprintln!(
                "Warning: Unknown rotation strategy '{}', defaulting to 'daily'",
                other
            );
            Rotation::DAILY
        }
    }
}
