use serde::{Deserialize, Serialize};

/// Ceiling on the summed byte length of one argument vector.
///
/// Lengths are counted as `len(word) + 1` to include the NUL terminator.
/// The limit is exclusive: a vector totalling exactly `Bytes(n)` does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ByteLimit {
    /// No OS constraint applies (print-only mode).
    #[default]
    Unbounded,
    /// At most `n - 1` bytes fit.
    Bytes(usize),
}

impl ByteLimit {
    /// Returns `true` if a vector totalling `total` bytes stays strictly under the limit.
    #[inline]
    pub fn admits(&self, total: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Bytes(max) => total < *max,
        }
    }
}

/// Per-batch limits: byte size and element count of `prefix + tokens`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Byte ceiling for the whole vector.
    pub max_bytes: ByteLimit,
    /// Element ceiling for the whole vector; `None` means unbounded.
    pub max_count: Option<usize>,
}

impl Budget {
    /// Budget with neither a byte nor a count limit.
    pub const fn unbounded() -> Self {
        Self {
            max_bytes: ByteLimit::Unbounded,
            max_count: None,
        }
    }

    /// Create a budget from both limits.
    pub const fn new(max_bytes: ByteLimit, max_count: Option<usize>) -> Self {
        Self {
            max_bytes,
            max_count,
        }
    }

    /// Returns `true` once a vector of `count` elements may not grow any further.
    #[inline]
    pub fn count_reached(&self, count: usize) -> bool {
        self.max_count.is_some_and(|max| count >= max)
    }
}
