use std::{fmt, str::FromStr, sync::OnceLock};

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Local offset captured once at startup.
static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Which clock log timestamps are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerTimeZone {
    #[default]
    #[serde(alias = "Utc", alias = "UTC")]
    Utc,
    /// The offset captured by [`init_local_offset`].
    #[serde(alias = "Local")]
    Local,
}

impl LoggerTimeZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utc => "utc",
            Self::Local => "local",
        }
    }
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Utc, Self::Local]
            .into_iter()
            .find(|tz| s.trim().eq_ignore_ascii_case(tz.as_str()))
            .ok_or_else(|| LoggerError::InvalidTimeZone(s.to_string()))
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captures the local timezone offset.
///
/// Call in `main()` **before any thread is spawned**: detection refuses to
/// run in multi-threaded processes on most Unix platforms. Falls back to UTC.
pub fn init_local_offset() {
    let _ = LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
}

/// Offset used for `LoggerTimeZone::Local` timestamps.
pub(crate) fn local_offset() -> UtcOffset {
    LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&LoggerTimeZone::Local).unwrap(), r#""local""#);
        let tz: LoggerTimeZone = serde_json::from_str(r#""Local""#).unwrap();
        assert_eq!(tz, LoggerTimeZone::Local);
    }

    #[test]
    fn parses_case_insensitive() {
        assert_eq!(LoggerTimeZone::from_str("UTC").unwrap(), LoggerTimeZone::Utc);
        assert_eq!(LoggerTimeZone::from_str(" local ").unwrap(), LoggerTimeZone::Local);
        assert!(LoggerTimeZone::from_str("").is_err());
        assert!(LoggerTimeZone::from_str("pst").is_err());
    }

    #[test]
    fn display_returns_canonical_names() {
        assert_eq!(LoggerTimeZone::Utc.to_string(), "utc");
        assert_eq!(LoggerTimeZone::Local.to_string(), "local");
    }

    #[test]
    fn offset_is_stable_after_init() {
        init_local_offset();
        let first = local_offset();
        init_local_offset();
        assert_eq!(first, local_offset());
        assert!(first.whole_hours().abs() <= 14);
    }
}
