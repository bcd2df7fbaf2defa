//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "neonmines",
    version,
    about = "NeonMines: a 5x5 Mines game for the terminal"
)]
pub struct NeonminesCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Session options shared by `play` and `sim`.
/// Unset flags fall back to the resolved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Seed for mine placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Starting balance
    #[arg(long)]
    pub balance: Option<f64>,
    /// Bet amount per round
    #[arg(long)]
    pub bet: Option<f64>,
    /// Mines per round (2-24)
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=24))]
    pub mines: Option<u8>,
    /// Append settled rounds to this JSONL file
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive session, reading commands from stdin
    Play {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Play rounds automatically with a strategy
    Sim {
        /// Number of rounds to play
        #[arg(long)]
        rounds: u64,
        /// cautious, baseline, greedy, target:N or random:N
        #[arg(long)]
        strategy: Option<String>,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Re-execute recorded rounds and check their outcomes
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Aggregate statistics from JSONL round histories
    Stats {
        /// File or directory (.jsonl, .jsonl.zst)
        #[arg(long)]
        input: String,
    },
    /// Show the payout table for a mine count
    Odds {
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=24))]
        mines: u8,
    },
    /// Check the mine sampler's distribution
    Rng {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=24))]
        mines: u8,
        #[arg(long, default_value_t = 10_000)]
        trials: u32,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Names of all subcommands, for the usage hint.
pub const COMMANDS: &[&str] = &["play", "sim", "replay", "stats", "odds", "rng", "cfg"];
