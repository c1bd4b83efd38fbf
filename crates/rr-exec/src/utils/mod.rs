mod limits;
pub use limits::{environment_bytes, probe_arg_limits};

mod security;
pub use security::{Promise, Promises, Sandbox};
