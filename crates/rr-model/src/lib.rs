mod domain;
pub use domain::{CommandPrefix, Flag, Token};

mod budget;
pub use budget::{Budget, ByteLimit};

mod strategy;
pub use strategy::{DirExpansion, OrderMode, PatternSyntax};

mod status;
pub use status::ChildStatus;

mod config;
pub use config::RunConfig;
