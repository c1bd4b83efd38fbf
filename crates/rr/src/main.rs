mod cli;
mod expand;
mod input;

use std::{io, process};

use clap::{Parser, error::ErrorKind};
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use rr_core::prelude::*;
use rr_exec::{
    ExecError, ProcessRunner, Promise, Promises, Sandbox, environment_bytes, mirror_status,
    probe_arg_limits,
};
use rr_model::RunConfig;
use rr_observe::{init_local_offset, init_logger};

use crate::cli::{Cli, USAGE};

fn main() {
    // Offset detection refuses to run once threads exist.
    init_local_offset();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    match run(cli) {
        Ok(Completion::Finished | Completion::Replaced) => process::exit(0),
        Ok(Completion::ChildFailed(status)) => mirror_status(status),
        Err(err) => {
            eprintln!("rr: {err}");
            let usage = err.downcast_ref::<CoreError>().is_some_and(CoreError::is_usage);
            if usage {
                eprintln!("Usage: {USAGE}");
            }
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Completion> {
    init_logger(&cli.logger_config())?;

    let mut sandbox = Sandbox::new();
    sandbox.restrict(Promises::new(&[
        Promise::Stdio,
        Promise::Rpath,
        Promise::Proc,
        Promise::Exec,
    ]))?;

    let cfg = cli.to_run_config();
    debug!(?cfg, "configuration");

    let nocase = cfg.case_insensitive.is_enabled();
    let exclude = PatternSet::compile(&cfg.exclude, cfg.syntax, nocase)?;
    let only = PatternSet::compile(&cfg.only, cfg.syntax, nocase)?;
    let start = PatternSet::compile(&cfg.start, cfg.syntax, nocase)?;

    let mut words = cli.words;
    words.extend(input::read_lists(&cfg.lists)?);
    let (prefix, tokens) = input::split_command(
        words,
        cfg.print_only.is_enabled(),
        cfg.keep_dashdash.is_enabled(),
    )?;
    let tokens = expand::expand_directories(tokens, cfg.expansion, &exclude)?;

    let budget = compute_budget(&cfg, probe_arg_limits()?, environment_bytes());
    debug!(?budget, prefix = %prefix, tokens = tokens.len(), "inputs collected");

    narrow_after_reads(&mut sandbox, &cfg)?;

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let tokens = TokenOrderer::new(cfg.order)
        .with_restrict_to_one(cfg.restrict_to_one.is_enabled())
        .with_start_anchor(start)
        .order(tokens, &mut rng)?;

    let filter = TokenFilter::new(exclude, only);
    let batcher = Batcher::new(&prefix, tokens, &filter, budget)?;
    let orchestrator = Orchestrator::new(
        batcher,
        RunPolicy::from_config(&cfg),
        io::stdout(),
        io::stderr(),
    );

    let mut runner = ProcessRunner::default();
    Ok(orchestrator.run(&mut runner)?)
}

/// No file is opened past this point; print-only runs never start a process.
fn narrow_after_reads(sandbox: &mut Sandbox, cfg: &RunConfig) -> Result<(), ExecError> {
    let promises = if cfg.print_only.is_enabled() {
        Promises::new(&[Promise::Stdio])
    } else {
        Promises::new(&[Promise::Stdio, Promise::Proc, Promise::Exec])
    };
    sandbox.restrict(promises)
}
