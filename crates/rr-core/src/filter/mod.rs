//! Pattern sets and the token inclusion rule.
//!
//! Patterns always match the whole token. Matching runs on raw bytes so
//! tokens that are not valid UTF-8 are still filtered.
mod posix;

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use regex::bytes::{Regex, RegexBuilder};
use rr_model::PatternSyntax;
use tracing::trace;

use crate::error::CoreError;

/// Upper bound for one compiled pattern.
const PATTERN_SIZE_LIMIT: usize = 1024 * 1024;

/// Ordered collection of compiled, whole-token patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every source with the same syntax and case rule.
    ///
    /// The first invalid pattern aborts construction.
    pub fn compile<I, S>(sources: I, syntax: PatternSyntax, case_insensitive: bool) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for src in sources {
            set.push(src.as_ref(), syntax, case_insensitive)?;
        }
        Ok(set)
    }

    /// Compile and append one pattern.
    pub fn push(&mut self, src: &str, syntax: PatternSyntax, case_insensitive: bool) -> Result<(), CoreError> {
        let bad = |reason: String| CoreError::Pattern {
            pattern: src.to_string(),
            reason,
        };
        let body = posix::translate(src, syntax).map_err(bad)?;
        let re = RegexBuilder::new(&format!(r"\A(?:{body})\z"))
            .case_insensitive(case_insensitive)
            .unicode(false)
            .dot_matches_new_line(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| bad(e.to_string()))?;

        trace!(pattern = src, compiled = re.as_str(), "pattern compiled");
        self.patterns.push(re);
        Ok(())
    }

    /// Check if no pattern is configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns `true` if at least one pattern matches the whole token.
    pub fn any_match(&self, token: &OsStr) -> bool {
        let bytes = token.as_bytes();
        self.patterns.iter().any(|re| re.is_match(bytes))
    }

    /// Index of the first token matched by any pattern.
    pub fn position<T: AsRef<OsStr>>(&self, tokens: &[T]) -> Option<usize> {
        tokens.iter().position(|t| self.any_match(t.as_ref()))
    }
}

/// The `exclude` / `only` pair deciding which tokens reach a batch.
#[derive(Debug, Clone, Default)]
pub struct TokenFilter {
    exclude: PatternSet,
    only: PatternSet,
}

impl TokenFilter {
    pub fn new(exclude: PatternSet, only: PatternSet) -> Self {
        Self { exclude, only }
    }

    /// Filter that keeps every token.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Inclusion rule:
    /// - any `exclude` match drops the token, whatever `only` says;
    /// - an empty `only` set keeps everything else;
    /// - otherwise the token must match at least one `only` pattern.
    pub fn keep(&self, token: &OsStr) -> bool {
        if self.exclude.any_match(token) {
            return false;
        }
        self.only.is_empty() || self.only.any_match(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_model::PatternSyntax::{Basic, Extended};
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    fn set(src: &[&str]) -> PatternSet {
        PatternSet::compile(src, Basic, false).unwrap()
    }

    #[test]
    fn matches_whole_token_only() {
        let s = set(&["b"]);
        assert!(s.any_match(OsStr::new("b")));
        assert!(!s.any_match(OsStr::new("abc")));

        let s = set(&[".*\\.c"]);
        assert!(s.any_match(OsStr::new("main.c")));
        assert!(!s.any_match(OsStr::new("main.cc")));
    }

    #[test]
    fn alternation_is_scoped_by_anchoring() {
        let s = PatternSet::compile(["a|b"], Extended, false).unwrap();
        assert!(s.any_match(OsStr::new("a")));
        assert!(s.any_match(OsStr::new("b")));
        assert!(!s.any_match(OsStr::new("ab")));
    }

    #[test]
    fn basic_and_extended_differ() {
        let bre = PatternSet::compile(["a+"], Basic, false).unwrap();
        let ere = PatternSet::compile(["a+"], Extended, false).unwrap();
        assert!(bre.any_match(OsStr::new("a+")));
        assert!(!bre.any_match(OsStr::new("aaa")));
        assert!(ere.any_match(OsStr::new("aaa")));
    }

    #[test]
    fn case_insensitive() {
        let s = PatternSet::compile(["readme"], Basic, true).unwrap();
        assert!(s.any_match(OsStr::new("README")));
        assert!(!set(&["readme"]).any_match(OsStr::new("README")));
    }

    #[test]
    fn non_utf8_tokens_are_matchable() {
        let tok = OsString::from_vec(vec![b'x', 0xff, b'y']);
        assert!(set(&["x.y"]).any_match(&tok));
    }

    #[test]
    fn invalid_pattern_fails_at_construction() {
        let err = PatternSet::compile(["[oops"], Basic, false).unwrap_err();
        assert!(matches!(err, CoreError::Pattern { ref pattern, .. } if pattern == "[oops"));
        assert!(err.is_usage());

        assert!(PatternSet::compile(["a{2"], Extended, false).is_err());
    }

    #[test]
    fn exclusion_dominates_only() {
        let f = TokenFilter::new(set(&["b"]), set(&["a", "b"]));
        assert!(f.keep(OsStr::new("a")));
        assert!(!f.keep(OsStr::new("b")));
        assert!(!f.keep(OsStr::new("c")));
    }

    #[test]
    fn empty_only_keeps_everything_not_excluded() {
        let f = TokenFilter::new(set(&["b"]), PatternSet::new());
        assert!(f.keep(OsStr::new("a")));
        assert!(f.keep(OsStr::new("c")));
        assert!(!f.keep(OsStr::new("b")));
        assert!(TokenFilter::allow_all().keep(OsStr::new("anything")));
    }

    #[test]
    fn dot_matches_embedded_newline() {
        let excluded = TokenFilter::new(set(&[".*\\.o"]), PatternSet::new());
        assert!(!excluded.keep(OsStr::new("dir\nx.o")));

        let only_any = TokenFilter::new(PatternSet::new(), set(&[".*"]));
        assert!(only_any.keep(OsStr::new("dir\nx.o")));
        assert!(PatternSet::compile(["a.b"], Extended, false).unwrap().any_match(OsStr::new("a\nb")));
    }

    #[test]
    fn position_finds_first_match() {
        let s = set(&["c.*"]);
        let toks = ["a", "cat", "b", "cow"];
        assert_eq!(s.position(&toks), Some(1));
        assert_eq!(set(&["z"]).position(&toks), None);
    }
}
