use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?} (expected text, json or journald)")]
    InvalidFormat(String),

    #[error("journald logging is only available on Linux")]
    JournaldNotSupported,

    #[error("cannot connect to journald: {0}")]
    JournaldInitFailed(#[source] std::io::Error),

    #[error("a global logger is already installed")]
    AlreadyInitialized,

    #[error("unknown timezone {0:?} (expected utc or local)")]
    InvalidTimeZone(String),

    #[error("bad log filter {filter:?}: {reason}")]
    InvalidLevel { filter: String, reason: String },
}

pub type LoggerResult<T> = Result<T, LoggerError>;
