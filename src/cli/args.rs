use std::{path::PathBuf, time::Duration};

use clap::Parser;
use otter_pdr::config::{Config, ConfigOption};
use serde::Serialize;

/// Checks a safety property of an AIGER ASCII circuit by property directed reachability
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The AIGER ASCII (.aag) file to check
    pub file: Option<PathBuf>,

    /// Time limit for the run, in seconds
    #[arg(short, long, value_parser = |seconds: &str| seconds.parse().map(Duration::from_secs))]
    pub time: Option<Duration>,

    /// Depth of a bounded model check made before the run, zero to skip
    #[arg(short, long, default_value_t = 0)]
    pub bmc: usize,

    /// Steps taken by a multi-step blocking query, one to disable
    #[arg(short, long, default_value_t = 1)]
    pub multi_step: usize,

    /// Obligations popped at a frame before multi-step queries are made from the frame
    #[arg(long, default_value_t = 10)]
    pub multi_step_threshold: usize,

    /// Index of the property to check
    #[arg(short, long, default_value_t = 0)]
    pub property: usize,

    /// Seed for the SAT solvers
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[arg(long, default_value_t = 0.0)]
    /// The chance of a random polarity when a SAT solver makes a decision
    pub random_decision_bias: f64,

    #[arg(short = 'l', long = "luby", default_value_t = 128)]
    /// The u value to use for the luby calculation when scheduling restarts
    pub luby_u: u32,

    /// Keep every latch of a cube extracted from a model
    #[arg(long, default_value_t = false)]
    pub no_widening: bool,

    /// Generalize blocked cubes by literal dropping alone
    #[arg(long, default_value_t = false)]
    pub no_core_shrink: bool,

    /// Certify the invariant or trace before reporting
    #[arg(short, long, default_value_t = false)]
    pub check: bool,

    /// Display the invariant clauses, if the property is proved
    #[arg(short, long, default_value_t = false)]
    pub invariant: bool,

    /// Display an AIGER witness, if the property is disproved
    #[arg(short, long, default_value_t = false)]
    pub witness: bool,

    /// What to display during and after the run
    #[arg(long, default_value_t, value_enum)]
    pub detail: Detail,

    /// Log verbosity, repeated for more detail (requires the log feature)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print help as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Detail {
    /// The result line only
    Quiet,
    /// The result line, followed by counters from the run
    #[default]
    Summary,
    /// The count of cubes per frame, refreshed as frames are opened, and the summary
    Progress,
}

pub enum ConfigError {
    OutOfBounds(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            ConfigError::OutOfBounds(s) => write!(f, "{s}"),
        }
    }
}

fn set_option<T: Clone + PartialOrd + std::fmt::Display>(
    option: &mut ConfigOption<T>,
    value: T,
) -> Result<(), ConfigError> {
    match option.set(value.clone()) {
        true => Ok(()),
        false => Err(ConfigError::OutOfBounds(format!(
            "{} requires a value between {} and {}, not {value}",
            option.name, option.min, option.max
        ))),
    }
}

/// The engine configuration requested by `args`.
pub fn config_from_args(args: &Args) -> Result<Config, ConfigError> {
    let mut config = Config {
        time_limit: args.time,
        ..Config::default()
    };

    set_option(&mut config.bmc_depth, args.bmc)?;
    set_option(&mut config.multi_step.depth, args.multi_step)?;
    set_option(&mut config.multi_step.threshold, args.multi_step_threshold)?;
    set_option(&mut config.property, args.property)?;
    set_option(&mut config.random_seed, args.seed)?;
    set_option(&mut config.random_decision_bias, args.random_decision_bias)?;
    set_option(&mut config.luby_u, args.luby_u)?;
    set_option(&mut config.ternary_widening, !args.no_widening)?;
    set_option(&mut config.core_shrink, !args.no_core_shrink)?;
    set_option(&mut config.check_result, args.check)?;

    Ok(config)
}
