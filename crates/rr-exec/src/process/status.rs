use rr_core::dispatch::DispatchError;
use rr_model::ChildStatus;

/// Classify a raw `waitpid` status.
pub(super) fn decode(raw: libc::c_int) -> Result<ChildStatus, DispatchError> {
    if libc::WIFEXITED(raw) {
        Ok(ChildStatus::Exited(libc::WEXITSTATUS(raw)))
    } else if libc::WIFSIGNALED(raw) {
        Ok(ChildStatus::Signaled(libc::WTERMSIG(raw)))
    } else {
        Err(DispatchError::UnknownStatus(raw))
    }
}

/// Terminate the current process the same way a failed child did.
///
/// An exit code is returned as-is. A signal is re-raised against ourselves
/// with its default disposition; should that not terminate us, exit with 1.
pub fn mirror_status(status: ChildStatus) -> ! {
    match status {
        ChildStatus::Exited(code) => std::process::exit(code),
        ChildStatus::Signaled(sig) => {
            unsafe {
                libc::signal(sig, libc::SIG_DFL);
                libc::kill(libc::getpid(), sig);
            }
            std::process::exit(1)
        }
    }
}
