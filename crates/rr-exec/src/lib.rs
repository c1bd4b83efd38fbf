mod error;
pub use error::ExecError;

mod utils;
pub use utils::*;

mod process;
pub use process::{ProcessRunner, mirror_status};
