use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use rr_model::{DirExpansion, Flag, OrderMode, PatternSyntax, RunConfig};
use rr_observe::{LoggerConfig, LoggerFormat, LoggerLevel, LoggerTimeZone};

pub const USAGE: &str = "rr [-1dDEeiNOpRrv] [-l file] [-m margin] [-n maxargs] [-o regex] [-s start]\n\t[-x regex] cmd [flags --] params...";

/// Run a command over its parameters in random order, split to fit the
/// system argument limits.
#[derive(Debug, Parser)]
#[command(name = "rr", version, override_usage = USAGE)]
pub struct Cli {
    /// Keep only one randomly chosen parameter.
    #[arg(short = '1')]
    pub just_one: bool,

    /// Keep a `--` separator as the last word of the command.
    #[arg(short = 'd')]
    pub keep_dashdash: bool,

    /// Replace directory parameters by their leaf directories (implies -r).
    #[arg(short = 'D')]
    pub leaf_dirs: bool,

    /// Patterns use extended syntax.
    #[arg(short = 'E')]
    pub extended: bool,

    /// Stop at the first failed command and exit the same way.
    #[arg(short = 'e')]
    pub exit_on_error: bool,

    /// Patterns ignore case.
    #[arg(short = 'i')]
    pub ignore_case: bool,

    /// Keep parameters in their given order.
    #[arg(short = 'N')]
    pub no_random: bool,

    /// Run the command only once, dropping parameters that do not fit.
    #[arg(short = 'O')]
    pub once: bool,

    /// Print the command lines instead of running them (implies -v).
    #[arg(short = 'p')]
    pub print_only: bool,

    /// Rotate the parameters to a random start instead of shuffling.
    #[arg(short = 'R')]
    pub rotate: bool,

    /// Replace directory parameters by the files below them.
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Print each command line before running it.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Read more parameters from FILE, one per line.
    #[arg(short = 'l', value_name = "file")]
    pub lists: Vec<PathBuf>,

    /// Bytes kept free below the system argument limit.
    #[arg(short = 'm', value_name = "margin", default_value_t = 0, value_parser = parse_count)]
    pub margin: usize,

    /// Maximum number of words per command line, command included.
    #[arg(short = 'n', value_name = "maxargs", value_parser = parse_count)]
    pub max_args: Option<usize>,

    /// Keep only parameters matching REGEX.
    #[arg(short = 'o', value_name = "regex")]
    pub only: Vec<String>,

    /// Start with the first parameter matching REGEX.
    #[arg(short = 's', value_name = "start")]
    pub start: Vec<String>,

    /// Drop parameters matching REGEX.
    #[arg(short = 'x', value_name = "regex")]
    pub exclude: Vec<String>,

    /// Seed for the random order.
    #[arg(long, env = "RR_SEED", value_name = "N")]
    pub seed: Option<u64>,

    /// Log filter (e.g. "warn", "rr_core=debug,warn").
    #[arg(long, env = "RR_LOG", default_value = "warn", value_name = "FILTER")]
    pub log_level: LoggerLevel,

    /// Log format: text, json or journald.
    #[arg(long, env = "RR_LOG_FORMAT", default_value = "text", value_name = "FORMAT")]
    pub log_format: LoggerFormat,

    /// Log timestamps in utc or local time.
    #[arg(long, env = "RR_LOG_TZ", default_value = "utc", value_name = "TZ")]
    pub log_tz: LoggerTimeZone,

    /// Command, its fixed flags, then the parameters.
    #[arg(value_name = "cmd", trailing_var_arg = true)]
    pub words: Vec<OsString>,
}

/// Plain decimal digits only; `usize::from_str` would also take a leading `+`.
fn parse_count(s: &str) -> Result<usize, String> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("`{s}` is not a decimal number"));
    }
    s.parse().map_err(|e| format!("`{s}`: {e}"))
}

impl Cli {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            tz: self.log_tz,
            ..Default::default()
        }
    }

    /// Everything but the positional words.
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            max_count: self.max_args,
            margin: self.margin,
            order: OrderMode::from_flags(!self.no_random, self.rotate, self.just_one),
            restrict_to_one: Flag::from(self.just_one),
            once: Flag::from(self.once),
            verbose: Flag::from(self.verbose).or(Flag::from(self.print_only)),
            print_only: Flag::from(self.print_only),
            exit_on_error: Flag::from(self.exit_on_error),
            keep_dashdash: Flag::from(self.keep_dashdash),
            expansion: DirExpansion::from_flags(self.recursive, self.leaf_dirs),
            syntax: if self.extended {
                PatternSyntax::Extended
            } else {
                PatternSyntax::Basic
            },
            case_insensitive: Flag::from(self.ignore_case),
            exclude: self.exclude.clone(),
            only: self.only.clone(),
            start: self.start.clone(),
            lists: self.lists.clone(),
            seed: self.seed,
        }
    }
}
