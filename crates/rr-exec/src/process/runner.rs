use std::{io, os::unix::process::CommandExt, process::Command};

use tracing::{debug, trace};

use rr_core::dispatch::{DispatchError, Dispatcher};
use rr_model::{ChildStatus, Token};

use super::status::decode;

/// Dispatcher that runs batches as real child processes.
///
/// Children inherit stdin, stdout, stderr and the environment unchanged.
/// The program word is resolved through `PATH`.
pub struct ProcessRunner {
    /// Runner name.
    name: &'static str,
}

impl ProcessRunner {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new("process")
    }
}

impl Dispatcher for ProcessRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    fn spawn_and_wait(&mut self, argv: &[Token]) -> Result<ChildStatus, DispatchError> {
        let (program, mut cmd) = command(argv)?;

        let child = cmd
            .spawn()
            .map_err(|source| DispatchError::Spawn { program, source })?;
        let pid = child.id() as libc::pid_t;
        trace!(runner = self.name, pid, words = argv.len(), "child spawned");

        // The child is reaped by hand; `Child` has no drop glue that waits or kills.
        let status = wait_for(pid)?;
        debug!(runner = self.name, pid, %status, "child terminated");
        Ok(status)
    }

    fn replace(&mut self, argv: &[Token]) -> Result<(), DispatchError> {
        let (program, mut cmd) = command(argv)?;
        debug!(runner = self.name, words = argv.len(), "replacing process image");

        let source = cmd.exec();
        Err(DispatchError::Exec { program, source })
    }
}

fn command(argv: &[Token]) -> Result<(String, Command), DispatchError> {
    let (program, args) = argv.split_first().ok_or(DispatchError::EmptyCommand)?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok((program.to_string_lossy().into_owned(), cmd))
}

/// Block until `pid` terminates and return its decoded status.
fn wait_for(pid: libc::pid_t) -> Result<ChildStatus, DispatchError> {
    let mut raw: libc::c_int = 0;
    let got = loop {
        let rc = unsafe { libc::waitpid(pid, &mut raw, 0) };
        if rc != -1 {
            break rc;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(DispatchError::Wait(err));
        }
    };

    if got != pid {
        return Err(DispatchError::UnexpectedPid { expected: pid, got });
    }
    decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::ffi::OsString;

    fn argv(words: &[&str]) -> Vec<Token> {
        words.iter().map(OsString::from).collect()
    }

    #[test]
    fn reports_exit_codes() {
        let mut runner = ProcessRunner::default();

        let ok = runner.spawn_and_wait(&argv(&["true"])).unwrap();
        assert_eq!(ok, ChildStatus::Exited(0));
        assert!(ok.success());

        let three = runner.spawn_and_wait(&argv(&["sh", "-c", "exit 3"])).unwrap();
        assert_eq!(three, ChildStatus::Exited(3));
    }

    #[test]
    fn reports_terminating_signal() {
        let mut runner = ProcessRunner::default();
        let status = runner
            .spawn_and_wait(&argv(&["sh", "-c", "kill -TERM $$"]))
            .unwrap();
        assert_eq!(status, ChildStatus::Signaled(libc::SIGTERM));
        assert_eq!(status.to_string(), format!("exited on signal #{}", libc::SIGTERM));
    }

    #[test]
    fn passes_arguments_verbatim() {
        let mut runner = ProcessRunner::default();
        let status = runner
            .spawn_and_wait(&argv(&["sh", "-c", "test \"$1\" = 'a b'", "sh", "a b"]))
            .unwrap();
        assert!(status.success());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut runner = ProcessRunner::default();
        let err = runner
            .spawn_and_wait(&argv(&["rr-definitely-not-a-program"]))
            .unwrap_err();
        match err {
            DispatchError::Spawn { program, source } => {
                assert_eq!(program, "rr-definitely-not-a-program");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_replace_returns() {
        let mut runner = ProcessRunner::default();
        let err = runner
            .replace(&argv(&["rr-definitely-not-a-program", "x"]))
            .unwrap_err();
        assert!(matches!(err, DispatchError::Exec { .. }));
        assert!(err.to_string().starts_with("execvp rr-definitely-not-a-program: "));
    }

    #[test]
    fn empty_argv_is_rejected() {
        let mut runner = ProcessRunner::default();
        assert!(matches!(
            runner.spawn_and_wait(&[]),
            Err(DispatchError::EmptyCommand)
        ));
        assert!(matches!(runner.replace(&[]), Err(DispatchError::EmptyCommand)));
    }

    #[test]
    fn waiting_for_a_stranger_fails() {
        // pid 1 is never our child.
        let err = wait_for(1).unwrap_err();
        assert!(matches!(err, DispatchError::Wait(_)));
    }
}
