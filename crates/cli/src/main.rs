//! pedalctl - tilt-sensor pedals to a virtual joystick
//!
//! Reads pedal frames from a serial line, learns each pedal's travel,
//! shapes the values and publishes them on a Linux uinput device.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod dashboard;
mod error;
mod output;
mod settings;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigArgs, RunArgs, TrackArgs};

#[derive(Parser, Debug)]
#[command(name = "pedalctl")]
#[command(about = "Bridge serial tilt-sensor pedals to a Linux virtual joystick")]
#[command(version)]
#[command(long_about = "
pedalctl reads pedal frames from a serial port, learns each pedal's range of
travel, applies deadzones and adaptive smoothing, and publishes the result as
a virtual joystick through /dev/uinput.

Running without a subcommand is the same as `pedalctl run`.
Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bridge the serial pedals to a virtual joystick (default)
    Run(RunArgs),

    /// Print range-tracked percentages for raw sensor frames
    Track(TrackArgs),

    /// List detected serial ports
    Ports,

    /// Print the effective configuration
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let command = cli.command.unwrap_or(Commands::Run(cli.run));

    match execute_command(command, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

/// Logs go to stderr; stdout belongs to the dashboard and to `--json` output.
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pedalctl={log_level},openpedal={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn execute_command(command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => commands::run::execute(&args, json),
        Commands::Track(args) => commands::track::execute(&args),
        Commands::Ports => commands::ports::execute(json),
        Commands::Config(args) => commands::config::execute(&args, json),
    }
}
