//! Structured logging setup using the `tracing` ecosystem.
//!
//! The client itself only emits `tracing` events; applications embedding it
//! may call one of these initializers, or install their own subscriber.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::constants;
use crate::error::{AddonsError, AddonsResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install stderr logging plus a daily-rotated `addons-api.log` in `log_dir`.
///
/// `level` is any `EnvFilter` directive (`debug`, `addons_api=trace,warn`);
/// an unparsable one falls back to `info`. With `json_output` the file gets
/// one JSON object per event. Fails if a global subscriber already exists.
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> AddonsResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let appender =
        tracing_appender::rolling::daily(log_dir, format!("{}.log", constants::LIBRARY_NAME));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(vec![console_layer(level), file_layer(writer, level, json_output)])
        .try_init()
        .map_err(|e| AddonsError::Config(format!("failed to initialize logging: {e}")))?;

    tracing::info!(filter = level, dir = %log_dir.display(), json_output, "logging initialized");

    Ok(LogGuard { _worker: guard })
}

/// Returned by [`init_logging`]. Buffered file output is flushed when this
/// is dropped, so hold it for the life of the program.
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Install stderr logging only. A no-op if a subscriber is already set.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(console_layer(level))
        .try_init();
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn console_layer(level: &str) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(level_filter(level))
        .boxed()
}

fn file_layer(writer: NonBlocking, level: &str, json_output: bool) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true);

    if json_output {
        layer.json().with_filter(level_filter(level)).boxed()
    } else {
        layer.with_filter(level_filter(level)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_filter_falls_back_to_info() {
        assert_eq!(level_filter("addons_api=debug").to_string(), "addons_api=debug");
        assert_eq!(level_filter("addons_api=loud").to_string(), "info");
    }

    #[test]
    fn test_second_init_errors_instead_of_panicking() {
        let dir = TempDir::new().unwrap();
        let first = init_logging("debug", dir.path(), false);
        init_console_logging("debug");
        let second = init_logging("debug", dir.path(), true);
        assert!(first.is_err() || second.is_err());
        assert!(dir.path().exists());
    }
}
