//! Splits the ordered token sequence into budget-respecting batches.
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use rr_model::{Budget, ByteLimit, CommandPrefix, Token};
use tracing::trace;

use crate::error::CoreError;
use crate::filter::TokenFilter;

/// One argument vector ready to dispatch: the prefix followed by a run of tokens.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    argv: &'a [Token],
    prefix_len: usize,
    bytes: usize,
    more: bool,
}

impl<'a> Batch<'a> {
    /// Full vector, program first.
    pub fn argv(&self) -> &'a [Token] {
        self.argv
    }

    /// Only the tokens appended after the prefix.
    pub fn tokens(&self) -> &'a [Token] {
        &self.argv[self.prefix_len..]
    }

    /// Summed `len + 1` of every word.
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// Returns `true` if tokens are left for later batches.
    pub fn has_more(&self) -> bool {
        self.more
    }

    /// Echo the vector as one line, every word followed by a space.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for word in self.argv {
            w.write_all(word.as_bytes())?;
            w.write_all(b" ")?;
        }
        w.write_all(b"\n")
    }
}

/// Forward-only cursor over the token sequence producing successive batches.
///
/// The argument buffer is allocated once with the prefix in place; every
/// batch truncates it back to the prefix and appends fresh tokens. Tokens are
/// moved out of the sequence as they are consumed.
///
/// Rules for one batch:
/// - tokens rejected by the filter are skipped;
/// - a token that would bring the byte total to the limit or beyond ends the
///   batch and is retried first in the next one;
/// - the batch also ends once it holds `max_count` elements.
#[derive(Debug)]
pub struct Batcher<'a> {
    filter: &'a TokenFilter,
    budget: Budget,
    tokens: Vec<Token>,
    cursor: usize,
    argv: Vec<Token>,
    reset: usize,
    prefix_bytes: usize,
    stalled_at: Option<usize>,
    done: bool,
}

impl<'a> Batcher<'a> {
    /// Fails if the prefix alone already uses up the element budget.
    pub fn new(
        prefix: &CommandPrefix,
        tokens: Vec<Token>,
        filter: &'a TokenFilter,
        budget: Budget,
    ) -> Result<Self, CoreError> {
        if let Some(max) = budget.max_count {
            if prefix.len() >= max {
                return Err(CoreError::CommandTooLong {
                    max,
                    words: prefix.len(),
                });
            }
        }

        let mut argv = Vec::with_capacity(prefix.len() + tokens.len().min(1024));
        argv.extend(prefix.words().iter().cloned());

        let mut batcher = Self {
            filter,
            budget,
            tokens,
            cursor: 0,
            reset: argv.len(),
            argv,
            prefix_bytes: prefix.byte_len(),
            stalled_at: None,
            done: false,
        };
        batcher.skip_dropped();
        Ok(batcher)
    }

    /// Tokens not consumed yet, including ones the filter will drop.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// Build the next batch, or `None` once the final batch was handed out.
    ///
    /// The first call always yields a batch, even with no tokens at all.
    pub fn next_batch(&mut self) -> Result<Option<Batch<'_>>, CoreError> {
        if self.done {
            return Ok(None);
        }
        self.argv.truncate(self.reset);

        let mut current = self.prefix_bytes;
        while self.cursor < self.tokens.len() && !self.budget.count_reached(self.argv.len()) {
            let token = &self.tokens[self.cursor];
            if !self.filter.keep(token) {
                self.cursor += 1;
                continue;
            }
            let next = match current.checked_add(token.len() + 1) {
                Some(n) if self.budget.max_bytes.admits(n) => n,
                _ => break,
            };
            current = next;
            self.argv.push(std::mem::take(&mut self.tokens[self.cursor]));
            self.cursor += 1;
        }
        self.skip_dropped();

        let more = self.cursor < self.tokens.len();
        let added = self.argv.len() - self.reset;
        if added == 0 && more {
            // Nothing fit: a second prefix-only batch at the same spot would loop forever.
            if self.stalled_at == Some(self.cursor) {
                return Err(CoreError::TokenTooLong {
                    token: self.tokens[self.cursor].to_string_lossy().into_owned(),
                    limit: match self.budget.max_bytes {
                        ByteLimit::Bytes(n) => n,
                        ByteLimit::Unbounded => usize::MAX,
                    },
                });
            }
            self.stalled_at = Some(self.cursor);
        } else {
            self.stalled_at = None;
        }
        if !more {
            self.done = true;
        }

        trace!(
            tokens = added,
            bytes = current,
            remaining = self.remaining(),
            "batch assembled"
        );
        Ok(Some(Batch {
            argv: &self.argv,
            prefix_len: self.reset,
            bytes: current,
            more,
        }))
    }

    /// Advance past tokens the filter rejects, so exhaustion is known up front.
    fn skip_dropped(&mut self) {
        while self.cursor < self.tokens.len() && !self.filter.keep(&self.tokens[self.cursor]) {
            self.cursor += 1;
        }
    }
}
