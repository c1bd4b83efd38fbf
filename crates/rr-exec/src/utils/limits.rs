//! OS ceilings that bound one child's argument vector.
use std::io;

use rr_core::budget::{ArgLimits, env_footprint};
use tracing::debug;

use crate::ExecError;

/// Query `ARG_MAX` and the path length reserved for resolving the program.
///
/// `pathconf` may report "no limit" (-1); `PATH_MAX` is used then.
pub fn probe_arg_limits() -> Result<ArgLimits, ExecError> {
    let arg_max = unsafe { libc::sysconf(libc::_SC_ARG_MAX) };
    if arg_max <= 0 {
        return Err(ExecError::NoLimit {
            call: "sysconf(_SC_ARG_MAX)",
        });
    }

    let path_max = unsafe { libc::pathconf(c"/".as_ptr(), libc::_PC_PATH_MAX) };
    let path_max = if path_max > 0 {
        path_max as usize
    } else {
        debug!(err = %io::Error::last_os_error(), "pathconf gave no PATH_MAX, using the compile-time one");
        libc::PATH_MAX as usize
    };

    let limits = ArgLimits {
        arg_max: arg_max as usize,
        path_max,
    };
    debug!(?limits, "argument limits probed");
    Ok(limits)
}

/// Bytes the current environment will occupy in every child.
pub fn environment_bytes() -> usize {
    env_footprint(std::env::vars_os())
}
