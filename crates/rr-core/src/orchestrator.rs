//! Drives batches from the batcher to a dispatcher.
use std::io::Write;

use rr_model::{ChildStatus, RunConfig};
use tracing::{debug, instrument};

use crate::batch::Batcher;
use crate::dispatch::Dispatcher;
use crate::error::CoreError;

/// Run-wide switches deciding how each batch is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunPolicy {
    /// Exactly one batch; leftover tokens are discarded.
    pub once: bool,
    /// Compute and echo batches, never dispatch.
    pub print_only: bool,
    /// Echo each batch before dispatching it.
    pub echo: bool,
    /// Stop at the first failed child and mirror its status.
    pub exit_on_error: bool,
}

impl RunPolicy {
    pub fn from_config(cfg: &RunConfig) -> Self {
        Self {
            once: cfg.once.is_enabled(),
            print_only: cfg.print_only.is_enabled(),
            echo: cfg.echoes_batches(),
            exit_on_error: cfg.exit_on_error.is_enabled(),
        }
    }

    /// The last batch (or the only one in once mode) replaces this process.
    pub fn step(&self, has_more: bool) -> Step {
        if has_more && !self.once {
            Step::Continue
        } else {
            Step::ReplaceAndTerminate
        }
    }
}

/// What happens to one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run in a child, wait, then build the next batch.
    Continue,
    /// Exec in place of this process; nothing runs afterwards.
    ReplaceAndTerminate,
}

/// How a run ended when control came back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// All batches handled (print-only runs, or children that all returned).
    Finished,
    /// The dispatcher accepted the final replacement without leaving the process.
    Replaced,
    /// A child failed under the exit-on-error policy; the caller mirrors it.
    ChildFailed(ChildStatus),
}

/// Owns one run: batcher, policy and the two report streams.
///
/// `out` receives echoed batches, `err` receives child failure reports.
pub struct Orchestrator<'a, O, E> {
    batcher: Batcher<'a>,
    policy: RunPolicy,
    out: O,
    err: E,
}

impl<'a, O: Write, E: Write> Orchestrator<'a, O, E> {
    pub fn new(batcher: Batcher<'a>, policy: RunPolicy, out: O, err: E) -> Self {
        Self {
            batcher,
            policy,
            out,
            err,
        }
    }

    /// Dispatch batches strictly one after another until the sequence is drained.
    #[instrument(level = "debug", skip_all, fields(dispatcher = dispatcher.name()))]
    pub fn run<D: Dispatcher>(mut self, dispatcher: &mut D) -> Result<Completion, CoreError> {
        while let Some(batch) = self.batcher.next_batch()? {
            if self.policy.echo {
                batch.write_to(&mut self.out)?;
                self.out.flush()?;
            }

            let step = self.policy.step(batch.has_more());
            if self.policy.print_only {
                match step {
                    Step::Continue => continue,
                    Step::ReplaceAndTerminate => return Ok(Completion::Finished),
                }
            }

            match step {
                Step::Continue => {
                    let status = dispatcher.spawn_and_wait(batch.argv())?;
                    debug!(%status, tokens = batch.tokens().len(), "child reaped");
                    if !status.success() {
                        writeln!(self.err, "Command {status}")?;
                        if self.policy.exit_on_error {
                            return Ok(Completion::ChildFailed(status));
                        }
                    }
                }
                Step::ReplaceAndTerminate => {
                    debug!(tokens = batch.tokens().len(), "replacing process with final batch");
                    self.err.flush()?;
                    dispatcher.replace(batch.argv())?;
                    return Ok(Completion::Replaced);
                }
            }
        }
        Ok(Completion::Finished)
    }
}
