use serde::{Deserialize, Serialize};

/// How the token sequence is reordered before batching.
///
/// Strategies:
/// - `Stable`: input order is kept.
/// - `Shuffle`: uniform random permutation of the whole sequence.
/// - `RotateRandom`: rotate so a uniformly chosen token leads, relative order otherwise kept.
/// - `SwapFirst`: swap a uniformly chosen token into first position, everything else untouched.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderMode {
    Stable,
    #[default]
    Shuffle,
    RotateRandom,
    SwapFirst,
}

impl OrderMode {
    /// Resolve the mode from the command-line switches.
    ///
    /// `randomize = false` always wins; rotation takes precedence over the
    /// single-pick swap.
    pub fn from_flags(randomize: bool, rotate: bool, just_one: bool) -> Self {
        match (randomize, rotate, just_one) {
            (false, _, _) => OrderMode::Stable,
            (true, true, _) => OrderMode::RotateRandom,
            (true, false, true) => OrderMode::SwapFirst,
            (true, false, false) => OrderMode::Shuffle,
        }
    }

    /// Returns `true` for every mode that consumes randomness.
    pub fn is_randomized(&self) -> bool {
        !matches!(self, OrderMode::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderMode;

    #[test]
    fn flags_map_to_modes() {
        assert_eq!(OrderMode::from_flags(false, true, true), OrderMode::Stable);
        assert_eq!(OrderMode::from_flags(true, true, true), OrderMode::RotateRandom);
        assert_eq!(OrderMode::from_flags(true, false, true), OrderMode::SwapFirst);
        assert_eq!(OrderMode::from_flags(true, false, false), OrderMode::Shuffle);
    }

    #[test]
    fn only_stable_is_deterministic() {
        assert!(!OrderMode::Stable.is_randomized());
        assert!(OrderMode::Shuffle.is_randomized());
        assert!(OrderMode::RotateRandom.is_randomized());
        assert!(OrderMode::SwapFirst.is_randomized());
    }
}
