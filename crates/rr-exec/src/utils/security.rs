//! Self-restriction of the running process.
//!
//! ## Overview
//!
//! The process narrows what it may do in steps, once it knows it no longer
//! needs a privilege. A [`Sandbox`] remembers the current set of
//! [`Promises`] and refuses any step that would widen it.
//!
//! ## Platforms
//!
//! - **OpenBSD**: the promise set maps onto `pledge(2)` one to one.
//! - **Linux**: there is no per-syscall pledge. While `exec` is still
//!   promised nothing is applied. Once it is dropped the process sets
//!   `no_new_privs` (fatal on failure) and clears every capability set
//!   (best-effort, a failure only warns).
//! - Everything else: a no-op.
use std::fmt;

use tracing::debug;
#[cfg(target_os = "linux")]
use tracing::warn;

use crate::ExecError;

/// A single privilege the process may keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promise {
    /// Basic I/O on already open descriptors.
    Stdio,
    /// Opening files and directories for reading.
    Rpath,
    /// Creating and waiting for child processes.
    Proc,
    /// Replacing the process image.
    Exec,
}

impl Promise {
    const ALL: [Promise; 4] = [Self::Stdio, Self::Rpath, Self::Proc, Self::Exec];

    fn bit(self) -> u8 {
        match self {
            Self::Stdio => 1 << 0,
            Self::Rpath => 1 << 1,
            Self::Proc => 1 << 2,
            Self::Exec => 1 << 3,
        }
    }

    /// Name as understood by `pledge(2)`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Rpath => "rpath",
            Self::Proc => "proc",
            Self::Exec => "exec",
        }
    }
}

/// Set of promises, kept as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Promises {
    bits: u8,
}

impl Promises {
    pub fn new(promises: &[Promise]) -> Self {
        let bits = promises.iter().fold(0, |acc, p| acc | p.bit());
        Self { bits }
    }

    #[inline]
    pub fn contains(&self, promise: Promise) -> bool {
        self.bits & promise.bit() != 0
    }

    #[inline]
    pub fn is_subset_of(&self, other: &Promises) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Promise> + '_ {
        Promise::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl fmt::Display for Promises {
    /// Space separated, in the form `pledge(2)` expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(p.name())?;
        }
        Ok(())
    }
}

/// Tracks the promises already in force.
#[derive(Debug, Default)]
pub struct Sandbox {
    current: Option<Promises>,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hardened: bool,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promises currently in force, if any step has been taken.
    pub fn current(&self) -> Option<Promises> {
        self.current
    }

    /// Narrow the process to `promises`.
    ///
    /// Fails with [`ExecError::Widen`] if `promises` asks for anything the
    /// previous step gave up.
    pub fn restrict(&mut self, promises: Promises) -> Result<(), ExecError> {
        if let Some(current) = self.current {
            if !promises.is_subset_of(&current) {
                return Err(ExecError::Widen {
                    from: current.to_string(),
                    to: promises.to_string(),
                });
            }
        }

        self.apply(promises)?;
        debug!(promises = %promises, "privileges narrowed");
        self.current = Some(promises);
        Ok(())
    }

    #[cfg(target_os = "openbsd")]
    fn apply(&mut self, promises: Promises) -> Result<(), ExecError> {
        openbsd_impl::pledge(&promises).map_err(|source| ExecError::Restrict {
            call: "pledge",
            source,
        })
    }

    #[cfg(target_os = "linux")]
    fn apply(&mut self, promises: Promises) -> Result<(), ExecError> {
        if promises.contains(Promise::Exec) || self.hardened {
            return Ok(());
        }

        if let Err(err) = linux_impl::drop_all_capabilities() {
            warn!(%err, "failed to drop capabilities (continuing)");
        }
        linux_impl::apply_no_new_privs().map_err(|source| ExecError::Restrict {
            call: "prctl(PR_SET_NO_NEW_PRIVS)",
            source,
        })?;
        self.hardened = true;
        Ok(())
    }

    #[cfg(not(any(target_os = "linux", target_os = "openbsd")))]
    fn apply(&mut self, promises: Promises) -> Result<(), ExecError> {
        debug!(
            promises = %promises,
            os = std::env::consts::OS,
            "privilege narrowing is not enforced on this platform"
        );
        Ok(())
    }
}

#[cfg(target_os = "openbsd")]
mod openbsd_impl {
    use super::Promises;

    use std::{ffi::CString, io};

    pub fn pledge(promises: &Promises) -> io::Result<()> {
        let list = CString::new(promises.to_string())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let rc = unsafe { libc::pledge(list.as_ptr(), std::ptr::null()) };
        if rc != 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use std::io;

    const PR_SET_NO_NEW_PRIVS: libc::c_int = 38;
    const PR_CAP_AMBIENT: libc::c_int = 47;
    const PR_CAP_AMBIENT_CLEAR_ALL: libc::c_ulong = 4;

    const LINUX_CAPABILITY_VERSION_3: u32 = 0x2008_0522;

    /// Clear the ambient, effective, permitted and inheritable sets.
    ///
    /// Only syscalls, so it is also usable from a `pre_exec` hook.
    pub fn drop_all_capabilities() -> io::Result<()> {
        clear_ambient_caps()?;

        let mut header = CapUserHeader {
            version: LINUX_CAPABILITY_VERSION_3,
            pid: 0,
        };
        let data = [CapUserData::default(); 2];

        if unsafe { capset(&mut header, data.as_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn clear_ambient_caps() -> io::Result<()> {
        let rc = unsafe { libc::prctl(PR_CAP_AMBIENT, PR_CAP_AMBIENT_CLEAR_ALL, 0, 0, 0) };
        if rc != 0 {
            let err = io::Error::last_os_error();
            // Kernels before 4.3 have no ambient set.
            if err.raw_os_error() != Some(libc::EINVAL) {
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn apply_no_new_privs() -> io::Result<()> {
        let rc = unsafe { libc::prctl(PR_SET_NO_NEW_PRIVS, 1, 0, 0, 0) };
        if rc != 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }

    #[repr(C)]
    struct CapUserHeader {
        version: u32,
        pid: libc::c_int,
    }

    #[repr(C)]
    #[derive(Default, Clone, Copy)]
    struct CapUserData {
        effective: u32,
        permitted: u32,
        inheritable: u32,
    }

    unsafe extern "C" {
        fn capset(hdrp: *mut CapUserHeader, datap: *const CapUserData) -> libc::c_int;
    }
}
