mod config;
mod error;
mod log;
mod object;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use object::LoggerFormat;
pub use object::LoggerLevel;
pub use object::{LoggerTimeZone, init_local_offset};

/// Initializes the global tracing subscriber with the given configuration.
///
/// Diagnostics always go to stderr; stdout belongs to the batch listing
/// and to the children.
///
/// # Important: Local Timezone
/// For using `LoggerTimeZone::Local`, call [`init_local_offset`] first
/// thing in `main()`, before any thread exists.
///
/// # Examples
/// ```rust
/// use rr_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("Failed to initialize logger");
///
/// tracing::warn!("visible at the default level");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::install(cfg)
}
