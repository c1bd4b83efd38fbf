use std::ffi::OsString;

mod flag;
pub use flag::Flag;

mod prefix;
pub use prefix::CommandPrefix;

/// One parameter distributed across batches, usually a file path.
///
/// Kept as raw OS bytes: tokens come from argv, list files and directory
/// walks, none of which guarantee UTF-8.
pub type Token = OsString;
