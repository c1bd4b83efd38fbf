//! Real OS-process execution for batches.
mod runner;
pub use runner::ProcessRunner;

mod status;
pub use status::mirror_status;
