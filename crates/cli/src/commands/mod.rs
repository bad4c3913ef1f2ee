//! Command implementations for pedalctl

pub mod config;
pub mod ports;
pub mod run;
pub mod track;

use clap::Args;

use crate::settings::{ShapingArgs, SourceArgs};

/// Arguments of the bridge loop.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub shaping: ShapingArgs,

    /// Do not draw the terminal dashboard
    #[arg(long)]
    pub no_dashboard: bool,
}

/// Arguments of the range-tracking reporter.
#[derive(Args, Debug, Clone, Default)]
pub struct TrackArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Stop after this many printed frames
    #[arg(short = 'n', long)]
    pub count: Option<u64>,
}

/// Arguments accepted by `config`: everything `run` would apply.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub shaping: ShapingArgs,
}
