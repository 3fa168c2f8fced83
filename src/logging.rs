//! Logging setup for ckdscreen
//!
//! Installs a `tracing` subscriber. The library itself only emits events;
//! binaries and tests call one of these functions once at startup.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "CKDSCREEN_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Failed predictions and transport errors
    Error,
    /// Stale replies, forced risk levels, bad configuration values
    Warn,
    /// Submissions and verdicts
    Info,
    /// Requests, navigation and analysis summaries
    Debug,
    /// Patient values, per-field validation, range comparisons
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn crate_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(format!("ckdscreen={}", Level::from(level)))
}

fn install(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Initialize logging at `level` for the `ckdscreen` target.
///
/// `CKDSCREEN_LOG` takes precedence over `level` when set:
///
/// ```bash
/// CKDSCREEN_LOG=ckdscreen=debug cargo run --example screen_sample
/// ```
///
/// # Examples
///
/// ```no_run
/// use ckdscreen::logging::{LogLevel, init_logging};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("Screening service starting");
/// ```
pub fn init_logging(level: LogLevel) {
    install(EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| crate_filter(level)));
    tracing::info!(?level, "ckdscreen logging initialized");
}

/// Initialize logging with an explicit filter directive, falling back to
/// `ckdscreen=info` when it does not parse.
///
/// ```no_run
/// use ckdscreen::logging::init_logging_with_filter;
///
/// init_logging_with_filter("ckdscreen=info,ckdscreen::validation=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let parsed = EnvFilter::try_new(filter);
    let valid = parsed.is_ok();
    install(parsed.unwrap_or_else(|_| crate_filter(LogLevel::Info)));
    if valid {
        tracing::info!(filter, "ckdscreen logging initialized");
    } else {
        tracing::warn!(filter, "Invalid log filter, using ckdscreen=info");
    }
}
