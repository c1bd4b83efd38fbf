//! Byte budget for one child argument vector.
//!
//! The kernel caps the combined size of argv and the environment handed to
//! `execve`. What is left for a batch is that cap minus a worst-case path
//! reservation for resolving the program, minus the inherited environment,
//! minus a user margin.
use std::ffi::OsStr;

use rr_model::{Budget, ByteLimit, RunConfig};
use tracing::{debug, warn};

/// OS ceilings the budget is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgLimits {
    /// `sysconf(_SC_ARG_MAX)`.
    pub arg_max: usize,
    /// `pathconf("/", _PC_PATH_MAX)`.
    pub path_max: usize,
}

/// Bytes the environment takes in the child: `KEY=VALUE\0` per variable.
pub fn env_footprint<I, K, V>(vars: I) -> usize
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    vars.into_iter()
        .map(|(k, v)| k.as_ref().len() + 1 + v.as_ref().len() + 1)
        .sum()
}

/// `arg_max - path_max - env_bytes - margin`, clamped at zero.
///
/// A non-positive result yields `Bytes(0)`, which admits nothing: every
/// batch overflows immediately instead of wrapping around to a huge limit.
pub fn compute_max_bytes(limits: ArgLimits, env_bytes: usize, margin: usize) -> ByteLimit {
    let avail = limits.arg_max as i128
        - limits.path_max as i128
        - env_bytes as i128
        - margin as i128;

    match usize::try_from(avail) {
        Ok(bytes) if bytes > 0 => {
            debug!(
                arg_max = limits.arg_max,
                path_max = limits.path_max,
                env_bytes,
                margin,
                bytes,
                "argument byte budget computed"
            );
            ByteLimit::Bytes(bytes)
        }
        _ => {
            warn!(
                arg_max = limits.arg_max,
                path_max = limits.path_max,
                env_bytes,
                margin,
                "no room left for arguments"
            );
            ByteLimit::Bytes(0)
        }
    }
}

/// Full per-batch budget for a run.
///
/// Print-only runs never exec, so there is no byte ceiling to honor.
pub fn compute_budget(cfg: &RunConfig, limits: ArgLimits, env_bytes: usize) -> Budget {
    let max_bytes = if cfg.print_only.is_enabled() {
        ByteLimit::Unbounded
    } else {
        compute_max_bytes(limits, env_bytes, cfg.margin)
    };
    Budget::new(max_bytes, cfg.max_count)
}
