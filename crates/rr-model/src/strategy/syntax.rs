use serde::{Deserialize, Serialize};

/// Pattern dialect used for `-x`, `-o` and `-s` patterns.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternSyntax {
    /// POSIX basic syntax: grouping and intervals are written `\(..\)` and `\{..\}`.
    #[default]
    Basic,
    /// POSIX extended syntax.
    Extended,
}
