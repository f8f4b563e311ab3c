//! Logging bootstrap
//!
//! Library code logs through the `log` facade. [`init_logger`] forwards those
//! records into `tracing` and installs:
//! - a human-readable stdout layer (optional)
//! - a one-line JSON layer written to a daily-rolling file (when a log dir is set)
//!
//! Both layers use an `EnvFilter`, so `RUST_LOG` overrides the configured level.

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();
static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the logging system
///
/// Calling it again after a successful initialization is a no-op.
pub fn init_logger(config: &LoggingConfig) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    // Forward `log` records to tracing
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let file_layer = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let _ = LOG_DIR.set(log_dir.clone());

            let file_appender = rolling::daily(log_dir, &config.json_file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_target(true)
                    .with_timer(fmt::time::ChronoLocal::new(
                        "%Y-%m-%dT%H:%M:%S%.3f%:z".to_string(),
                    ))
                    .with_filter(build_filter(&config.level)),
            )
        }
        None => None,
    };

    let stdout_layer = if config.stdout {
        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                ))
                .with_filter(build_filter(&config.level)),
        )
    } else {
        None
    };

    let subscriber = Registry::default().with(file_layer).with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::info!(
        target: "gatekeep::logging",
        log_dir = ?config.log_dir,
        version = env!("CARGO_PKG_VERSION"),
        "Logger initialized successfully"
    );

    Ok(())
}

fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Get the log directory, if file logging is enabled
pub fn get_log_dir() -> Option<PathBuf> {
    LOG_DIR.get().cloned()
}
