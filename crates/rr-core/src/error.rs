use thiserror::Error;

use crate::dispatch::DispatchError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Usage(String),

    #[error("Bad regex {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Can't obey -n{max}, initial command is too long ({words} words)")]
    CommandTooLong { max: usize, words: usize },

    #[error("{0} requires arguments")]
    EmptySequence(&'static str),

    #[error("parameter {token} does not fit in {limit} bytes of arguments")]
    TokenTooLong { token: String, limit: usize },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Returns `true` for misconfiguration detected before anything ran.
    ///
    /// These are reported together with the usage synopsis.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            CoreError::Usage(_)
                | CoreError::Pattern { .. }
                | CoreError::CommandTooLong { .. }
                | CoreError::EmptySequence(_)
        )
    }
}
