pub mod budget;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod order;

mod batch;
pub use batch::{Batch, Batcher};

pub mod prelude {
    pub use crate::batch::{Batch, Batcher};
    pub use crate::budget::{ArgLimits, compute_budget, env_footprint};
    pub use crate::dispatch::{DispatchError, Dispatcher};
    pub use crate::error::CoreError;
    pub use crate::filter::{PatternSet, TokenFilter};
    pub use crate::orchestrator::{Completion, Orchestrator, RunPolicy, Step};
    pub use crate::order::TokenOrderer;
}
