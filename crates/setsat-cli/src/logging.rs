use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Routes structured JSON events to `telemetry.jsonl` beside the summary.
///
/// Returns `None` when structured logging is disabled. The guard must be
/// held until the run finishes so buffered events are flushed.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = outputs.summary_dir();
    fs::create_dir_all(&telemetry_dir).with_context(|| {
        format!(
            "creating telemetry directory at {}",
            telemetry_dir.display()
        )
    })?;

    let telemetry_path = telemetry_dir.join("telemetry.jsonl");
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = logging.level().unwrap_or(Level::INFO);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A global subscriber may already be installed (tests).
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}

/// Plain stderr output for one-off solves, filtered by `RUST_LOG`.
pub fn init_stderr_logging(default_level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
