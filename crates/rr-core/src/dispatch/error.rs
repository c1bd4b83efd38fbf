use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("nothing to execute")]
    EmptyCommand,

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("execvp {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waitpid: {0}")]
    Wait(#[source] std::io::Error),

    #[error("waitpid exited with {got} (expected {expected}, shouldn't happen)")]
    UnexpectedPid { expected: i32, got: i32 },

    #[error("unrecognized wait status {0:#x}")]
    UnknownStatus(i32),
}
