//! # NeonMines CLI Library
//!
//! Command-line front end for the NeonMines engine: an interactive session,
//! automated simulations, and tools for round histories.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand and returns the
//! process exit code. All output goes to the writers passed in.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = neonmines_cli::run(["neonmines", "odds", "--mines", "5"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Safe tiles: 20"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive session reading commands from stdin
//! - `sim`: Automated rounds with a strategy, optional JSONL output
//! - `replay`: Re-execute recorded rounds and check their outcomes
//! - `stats`: Aggregate statistics from JSONL round histories
//! - `odds`: Payout table for a mine count
//! - `rng`: Mine sampler distribution check
//! - `cfg`: Resolved configuration with value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, NeonminesCli, COMMANDS};
use commands::{
    handle_cfg_command, handle_odds_command, handle_play_command, handle_replay_command,
    handle_rng_command, handle_sim_command, handle_stats_command,
};

pub use config::{Config, ConfigError, ValueSource};
pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for an interrupted run.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    logging::init();

    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
    let cli = match NeonminesCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "NeonMines CLI");
                    write_or_exit!(err, "Usage: neonmines <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: neonmines --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Play { session } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&session, out, err, &mut stdin_lock)
        }
        Commands::Sim {
            rounds,
            strategy,
            session,
        } => handle_sim_command(rounds, strategy, &session, out, err),
        Commands::Replay { input } => handle_replay_command(&input, out, err),
        Commands::Stats { input } => handle_stats_command(&input, out, err),
        Commands::Odds { mines } => handle_odds_command(mines, out),
        Commands::Rng {
            seed,
            mines,
            trials,
        } => handle_rng_command(seed, mines, trials, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    exit_code_for(result, err)
}

/// Maps a handler result to an exit code, reporting the error on `err`.
fn exit_code_for(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        // the handler already printed how far the run got
        Err(CliError::Interrupted(_)) => exit_code::INTERRUPTED,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
