use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{DirExpansion, Flag, OrderMode, PatternSyntax};

/// Everything a run needs besides the words themselves.
///
/// Built once from the command line before any file is read, then shared
/// read-only by every stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Maximum elements per batch, prefix included (`-n`).
    pub max_count: Option<usize>,
    /// Bytes subtracted from the computed budget (`-m`).
    pub margin: usize,
    /// Token reordering (`-N`, `-R`, `-1`).
    pub order: OrderMode,
    /// Keep only the first token after ordering (`-1`).
    pub restrict_to_one: Flag,
    /// Dispatch exactly one batch (`-O`).
    pub once: Flag,
    /// Print every batch before running it (`-v`).
    pub verbose: Flag,
    /// Print batches, never run anything (`-p`).
    pub print_only: Flag,
    /// Mirror a failed child's status and stop (`-e`).
    pub exit_on_error: Flag,
    /// Keep a literal `--` as the last prefix word (`-d`).
    pub keep_dashdash: Flag,
    /// Directory expansion (`-r`, `-D`).
    pub expansion: DirExpansion,
    /// Dialect for all patterns (`-E`).
    pub syntax: PatternSyntax,
    /// Case-insensitive patterns (`-i`).
    pub case_insensitive: Flag,
    /// Exclude patterns (`-x`).
    pub exclude: Vec<String>,
    /// Only patterns (`-o`).
    pub only: Vec<String>,
    /// Start-anchor patterns (`-s`).
    pub start: Vec<String>,
    /// Files with one token per line (`-l`).
    pub lists: Vec<PathBuf>,
    /// Seed for the ordering RNG; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Whether batches are echoed; print-only mode always echoes.
    pub fn echoes_batches(&self) -> bool {
        self.verbose.is_enabled() || self.print_only.is_enabled()
    }
}
