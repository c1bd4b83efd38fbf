use std::{fmt, ops::Not};

use serde::{Deserialize, Serialize};

/// An on/off command-line switch.
///
/// Every switch is opt-in, so the default is off. Serialises as a plain bool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    pub const ON: Flag = Flag(true);
    pub const OFF: Flag = Flag(false);

    pub const fn enabled() -> Self {
        Self::ON
    }

    pub const fn disabled() -> Self {
        Self::OFF
    }

    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    pub const fn is_disabled(&self) -> bool {
        !self.0
    }

    /// On if either switch is on; used for switches implied by others.
    pub const fn or(self, other: Flag) -> Flag {
        Flag(self.0 || other.0)
    }
}

impl Not for Flag {
    type Output = Flag;
    fn not(self) -> Flag {
        Flag(!self.0)
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "on" } else { "off" })
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn off_by_default() {
        assert_eq!(Flag::default(), Flag::OFF);
        assert!(Flag::default().is_disabled());
        assert_eq!(Flag::default().to_string(), "off");
    }

    #[test]
    fn implied_switches() {
        assert_eq!(Flag::OFF.or(Flag::ON), Flag::ON);
        assert_eq!(Flag::OFF.or(Flag::OFF), Flag::OFF);
        assert_eq!(!Flag::ON, Flag::OFF);
        assert!(bool::from(Flag::from(true)));
    }

    #[test]
    fn serde_is_a_plain_bool() {
        assert_eq!(serde_json::to_string(&Flag::enabled()).unwrap(), "true");
        let back: Flag = serde_json::from_str("false").unwrap();
        assert!(back.is_disabled());
    }
}
