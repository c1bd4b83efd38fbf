use std::io;

use tracing::Subscriber;
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt};

use crate::logger::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    object::{LoggerFormat, LoggerRfc3339},
};

/// Installs the global subscriber for `cfg.format`.
///
/// Text and JSON go to stderr.
pub fn install(cfg: &LoggerConfig) -> LoggerResult<()> {
    let registry = tracing_subscriber::registry().with(cfg.level.to_env_filter());

    let installed = match cfg.format {
        LoggerFormat::Text => registry.with(text_layer(cfg)).try_init(),
        LoggerFormat::Json => registry.with(json_layer(cfg)).try_init(),
        LoggerFormat::Journald => registry.with(journald_layer()?).try_init(),
    };
    installed.map_err(|_| LoggerError::AlreadyInitialized)
}

fn text_layer<S>(cfg: &LoggerConfig) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(cfg.should_use_color())
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz))
}

fn json_layer<S>(cfg: &LoggerConfig) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(cfg.with_targets)
        .with_timer(LoggerRfc3339::new(cfg.tz))
}

#[cfg(target_os = "linux")]
fn journald_layer() -> LoggerResult<tracing_journald::Layer> {
    let layer = tracing_journald::layer().map_err(LoggerError::JournaldInitFailed)?;
    Ok(layer.with_syslog_identifier("rr".to_string()))
}

#[cfg(not(target_os = "linux"))]
fn journald_layer() -> LoggerResult<tracing_subscriber::layer::Identity> {
    Err(LoggerError::JournaldNotSupported)
}
