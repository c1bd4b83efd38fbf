use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::logger::LoggerError;

/// Only warnings and errors unless asked otherwise.
const DEFAULT_LEVEL: &str = "warn";

/// A validated `EnvFilter` directive string, e.g. `"rr_core=debug,warn"`.
///
/// `EnvFilter` itself is neither `Clone` nor serialisable, so the checked
/// text is kept and turned into a filter when the subscriber is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel {
    directives: String,
}

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use rr_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("rr_exec=trace,warn").unwrap();
    /// assert_eq!(lvl.as_str(), "rr_exec=trace,warn");
    /// assert!(LoggerLevel::new("rr_exec=loud").is_err());
    /// ```
    pub fn new(directives: impl Into<String>) -> Result<Self, LoggerError> {
        let directives = directives.into();
        let reason = match EnvFilter::try_new(&directives) {
            Err(e) => Some(e.to_string()),
            Ok(_) => bare_target(&directives).map(|word| format!("`{word}` is not a level")),
        };
        match reason {
            Some(reason) => Err(LoggerError::InvalidLevel {
                filter: directives,
                reason,
            }),
            None => Ok(Self { directives }),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.directives
    }

    /// Builds the `EnvFilter`, falling back to the default level.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

/// First directive with no `=` that is not a level either.
/// `EnvFilter` would take it as a target enabled at every level.
fn bare_target(directives: &str) -> Option<&str> {
    directives
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .find(|d| !d.contains('=') && d.parse::<LevelFilter>().is_err())
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self {
            directives: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.directives
    }
}
