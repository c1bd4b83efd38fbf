//! Seam between batch planning and the OS process layer.
//!
//! `rr-exec` provides the real implementation; tests plug in recorders.
mod error;
pub use error::DispatchError;

use rr_model::{ChildStatus, Token};

/// Executes assembled argument vectors.
pub trait Dispatcher {
    /// Dispatcher name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Run `argv` in a child process and block until that child terminates.
    fn spawn_and_wait(&mut self, argv: &[Token]) -> Result<ChildStatus, DispatchError>;

    /// Replace the current process image with `argv`.
    ///
    /// A real implementation only returns on failure; `Ok` means the
    /// replacement was recorded without actually happening.
    fn replace(&mut self, argv: &[Token]) -> Result<(), DispatchError>;
}
