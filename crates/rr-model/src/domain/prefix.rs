use std::ffi::{OsStr, OsString};
use std::fmt;

use crate::Token;

/// The fixed part of every batch: the command name plus its leading flags.
///
/// Built once per run and never reordered, filtered or mutated afterwards.
/// An empty prefix only exists in print-only mode, where nothing is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPrefix(Vec<Token>);

impl CommandPrefix {
    /// Create a prefix from the given words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }

    /// Prefix with no words at all (print-only mode).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the prefix has no words.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The program to execute, if any.
    pub fn program(&self) -> Option<&OsStr> {
        self.0.first().map(OsString::as_os_str)
    }

    /// All words, program first.
    pub fn words(&self) -> &[Token] {
        &self.0
    }

    /// Bytes the prefix occupies in an argument vector: every word plus its NUL.
    pub fn byte_len(&self) -> usize {
        self.0.iter().map(|w| w.len() + 1).sum()
    }
}

impl fmt::Display for CommandPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", w.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::CommandPrefix;

    #[test]
    fn byte_len_counts_terminators() {
        let p = CommandPrefix::new(["echo", "-n"]);
        assert_eq!(p.byte_len(), 5 + 3);
        assert_eq!(p.len(), 2);
        assert_eq!(p.program().unwrap(), "echo");
    }

    #[test]
    fn empty_prefix_has_no_program() {
        let p = CommandPrefix::empty();
        assert!(p.is_empty());
        assert!(p.program().is_none());
        assert_eq!(p.byte_len(), 0);
    }

    #[test]
    fn display_joins_words() {
        let p = CommandPrefix::new(["grep", "-l", "foo"]);
        assert_eq!(p.to_string(), "grep -l foo");
    }
}
