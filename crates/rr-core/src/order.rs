//! Decides the order in which the batcher consumes tokens.
use rand::Rng;
use rand::seq::SliceRandom;
use rr_model::{OrderMode, Token};
use tracing::debug;

use crate::error::CoreError;
use crate::filter::PatternSet;

/// Reorders a flat token sequence according to an [`OrderMode`].
///
/// Pipeline, in order:
/// 1. start anchor: drop everything before the first token matching a start pattern;
/// 2. the configured mode;
/// 3. optional truncation to the single leading token.
#[derive(Debug, Clone, Default)]
pub struct TokenOrderer {
    mode: OrderMode,
    restrict_to_one: bool,
    start: PatternSet,
}

impl TokenOrderer {
    pub fn new(mode: OrderMode) -> Self {
        Self {
            mode,
            restrict_to_one: false,
            start: PatternSet::new(),
        }
    }

    /// Keep only the first token once ordering is done.
    pub fn with_restrict_to_one(mut self, on: bool) -> Self {
        self.restrict_to_one = on;
        self
    }

    /// Start consumption at the first token matching any of these patterns.
    pub fn with_start_anchor(mut self, start: PatternSet) -> Self {
        self.start = start;
        self
    }

    /// Produce the final sequence.
    ///
    /// An empty sequence is rejected when a random pick or a single token was asked for.
    pub fn order<R: Rng>(&self, mut tokens: Vec<Token>, rng: &mut R) -> Result<Vec<Token>, CoreError> {
        if !self.start.is_empty() {
            if let Some(at) = self.start.position(&tokens) {
                debug!(skipped = at, "start anchor found");
                tokens.drain(..at);
            }
        }

        if tokens.is_empty() {
            if self.restrict_to_one {
                return Err(CoreError::EmptySequence("picking one parameter"));
            }
            if self.mode.is_randomized() {
                return Err(CoreError::EmptySequence("randomizing"));
            }
            return Ok(tokens);
        }

        let n = tokens.len();
        match self.mode {
            OrderMode::Stable => {}
            OrderMode::Shuffle => tokens.shuffle(rng),
            OrderMode::RotateRandom => {
                let k = rng.gen_range(0..n);
                tokens.rotate_left(k);
            }
            OrderMode::SwapFirst => {
                let k = rng.gen_range(0..n);
                tokens.swap(0, k);
            }
        }

        if self.restrict_to_one {
            tokens.truncate(1);
        }
        debug!(mode = ?self.mode, tokens = tokens.len(), "tokens ordered");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rr_model::PatternSyntax;

    fn toks(words: &[&str]) -> Vec<Token> {
        words.iter().map(Token::from).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn sorted(mut v: Vec<Token>) -> Vec<Token> {
        v.sort();
        v
    }

    #[test]
    fn stable_keeps_order() {
        let input = toks(&["a", "b", "c"]);
        let out = TokenOrderer::new(OrderMode::Stable).order(input.clone(), &mut rng()).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let input: Vec<Token> = (0..64).map(|i| Token::from(i.to_string())).collect();
        let out = TokenOrderer::new(OrderMode::Shuffle).order(input.clone(), &mut rng()).unwrap();
        assert_eq!(sorted(out.clone()), sorted(input.clone()));
        assert_ne!(out, input, "64 elements should not come back in input order");
    }

    #[test]
    fn shuffle_is_reproducible_with_a_seed() {
        let input = toks(&["a", "b", "c", "d", "e", "f"]);
        let o = TokenOrderer::new(OrderMode::Shuffle);
        assert_eq!(
            o.order(input.clone(), &mut rng()).unwrap(),
            o.order(input, &mut rng()).unwrap()
        );
    }

    #[test]
    fn rotate_preserves_cyclic_order() {
        let input = toks(&["a", "b", "c", "d", "e"]);
        for seed in 0..20 {
            let mut r = StdRng::seed_from_u64(seed);
            let out = TokenOrderer::new(OrderMode::RotateRandom).order(input.clone(), &mut r).unwrap();
            let k = input.iter().position(|t| *t == out[0]).unwrap();
            let mut expected = input.clone();
            expected.rotate_left(k);
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn swap_first_only_moves_two_elements() {
        let input = toks(&["a", "b", "c", "d", "e"]);
        for seed in 0..20 {
            let mut r = StdRng::seed_from_u64(seed);
            let out = TokenOrderer::new(OrderMode::SwapFirst).order(input.clone(), &mut r).unwrap();
            let moved = out.iter().zip(&input).filter(|(a, b)| a != b).count();
            assert!(moved == 0 || moved == 2, "moved {moved} elements");
            assert_eq!(sorted(out), sorted(input.clone()));
        }
    }

    #[test]
    fn restrict_to_one_yields_single_member() {
        let input = toks(&["a", "b", "c"]);
        for mode in [OrderMode::Stable, OrderMode::Shuffle, OrderMode::SwapFirst, OrderMode::RotateRandom] {
            let out = TokenOrderer::new(mode)
                .with_restrict_to_one(true)
                .order(input.clone(), &mut rng())
                .unwrap();
            assert_eq!(out.len(), 1);
            assert!(input.contains(&out[0]));
        }
    }

    #[test]
    fn start_anchor_drops_leading_tokens() {
        let start = PatternSet::compile(["c.*"], PatternSyntax::Basic, false).unwrap();
        let out = TokenOrderer::new(OrderMode::Stable)
            .with_start_anchor(start)
            .order(toks(&["a", "b", "cat", "d", "cow"]), &mut rng())
            .unwrap();
        assert_eq!(out, toks(&["cat", "d", "cow"]));
    }

    #[test]
    fn start_anchor_without_match_keeps_everything() {
        let start = PatternSet::compile(["zzz"], PatternSyntax::Basic, false).unwrap();
        let out = TokenOrderer::new(OrderMode::Stable)
            .with_start_anchor(start)
            .order(toks(&["a", "b"]), &mut rng())
            .unwrap();
        assert_eq!(out, toks(&["a", "b"]));
    }

    #[test]
    fn empty_sequence_rules() {
        assert!(TokenOrderer::new(OrderMode::Stable).order(Vec::new(), &mut rng()).unwrap().is_empty());

        for mode in [OrderMode::Shuffle, OrderMode::RotateRandom, OrderMode::SwapFirst] {
            let err = TokenOrderer::new(mode).order(Vec::new(), &mut rng()).unwrap_err();
            assert!(err.is_usage());
        }

        let err = TokenOrderer::new(OrderMode::Stable)
            .with_restrict_to_one(true)
            .order(Vec::new(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptySequence(_)));
    }
}
