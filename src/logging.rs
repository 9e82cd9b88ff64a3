//! Tracing setup for the qrmaker binary
//!
//! Terminal logs go to stderr so stdout only carries generated output and
//! JSON. When a log file is configured, a plain-text file layer is added that
//! also records span close events, so every shell command and export is
//! written with its duration.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// File name used when the configured log path is a directory
pub const DEFAULT_LOG_FILE: &str = "qrmaker.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Install the global subscriber described by `options`.
///
/// Does nothing if a subscriber is already installed.
pub fn init(options: &LoggingOptions) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(options.level.as_str())
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;

    Registry::default()
        .with(env_filter)
        .with(file_layer(options)?)
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_target(false)
                .with_ansi(options.color)
                .with_writer(io::stderr),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Where the file layer writes: `path` itself, or `path/qrmaker.log` when
/// `path` names a directory.
pub fn resolve_log_path(path: &Path) -> PathBuf {
    let names_dir = path.is_dir()
        || path.file_name().is_none()
        || path.as_os_str().to_string_lossy().ends_with(std::path::is_separator);
    if names_dir {
        path.join(DEFAULT_LOG_FILE)
    } else {
        path.to_path_buf()
    }
}

fn file_layer<S>(options: &LoggingOptions) -> Result<Option<BoxedLayer<S>>>
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync + 'static,
{
    let Some(configured) = options.file.as_deref() else {
        return Ok(None);
    };

    let writer = open_log_writer(&resolve_log_path(configured), options.rotation)?;

    Ok(Some(
        fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .boxed(),
    ))
}

fn open_log_writer(path: &Path, rotation: Option<LogRotation>) -> Result<NonBlocking> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let file_name = path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new(DEFAULT_LOG_FILE));

    let (writer, guard) = match rotation {
        Some(LogRotation::Hourly) => {
            NonBlockingBuilder::default()
                .lossy(false)
                .finish(rolling::hourly(dir, file_name))
        }
        Some(LogRotation::Daily) => {
            NonBlockingBuilder::default()
                .lossy(false)
                .finish(rolling::daily(dir, file_name))
        }
        None => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)
                .map_err(|e| {
                    Error::Config(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            NonBlockingBuilder::default().lossy(false).finish(file)
        }
    };

    // The worker flushes on drop, so it has to outlive main.
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}
