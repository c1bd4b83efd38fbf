use std::fmt;

/// How a finished child process terminated.
///
/// Exactly one shape holds per reaped child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    /// Normal exit with the given status code.
    Exited(i32),
    /// Killed by the given signal number.
    Signaled(i32),
}

impl ChildStatus {
    /// Returns `true` for a normal exit with status 0.
    #[inline]
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with {code}"),
            Self::Signaled(sig) => write!(f, "exited on signal #{sig}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChildStatus;

    #[test]
    fn only_zero_exit_is_success() {
        assert!(ChildStatus::Exited(0).success());
        assert!(!ChildStatus::Exited(3).success());
        assert!(!ChildStatus::Signaled(9).success());
    }

    #[test]
    fn display() {
        assert_eq!(ChildStatus::Exited(2).to_string(), "exited with 2");
        assert_eq!(ChildStatus::Signaled(15).to_string(), "exited on signal #15");
    }
}
