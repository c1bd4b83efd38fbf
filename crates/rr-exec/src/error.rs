use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{call} gave no usable limit")]
    NoLimit { call: &'static str },

    #[error("cannot widen privileges from [{from}] to [{to}]")]
    Widen { from: String, to: String },

    #[error("{call}: {source}")]
    Restrict {
        call: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
