use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// How diagnostics are rendered. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directives, e.g. `"rr_core=debug,warn"`.
    pub level: LoggerLevel,
    /// Timezone of the RFC 3339 timestamps.
    pub tz: LoggerTimeZone,
    /// Show the emitting module next to each event.
    pub with_targets: bool,
    /// Allow ANSI colors; only honoured when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::Utc,
            with_targets: false,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Checked when the subscriber is installed.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}
