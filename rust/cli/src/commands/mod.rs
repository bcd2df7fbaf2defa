//! Command handler modules.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from the process
//! - Errors propagated as [`CliError`]; [`crate::run`] maps them to exit codes

mod cfg;
mod odds;
mod play;
mod replay;
mod rng;
mod sim;
mod stats;

pub use cfg::handle_cfg_command;
pub use odds::handle_odds_command;
pub use play::handle_play_command;
pub use replay::handle_replay_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

use neonmines_engine::engine::Engine;

use crate::cli::SessionArgs;
use crate::config::{self, Config};
use crate::error::CliError;

/// Session parameters after applying flags over the resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionSettings {
    pub seed: u64,
    pub balance: f64,
    pub bet: f64,
    pub mines: u8,
}

impl SessionSettings {
    /// Flag values win over `cfg`; a missing seed is drawn at random.
    pub(crate) fn resolve(args: &SessionArgs, cfg: &Config) -> Self {
        Self {
            seed: args.seed.or(cfg.seed).unwrap_or_else(rand::random),
            balance: args.balance.unwrap_or(cfg.starting_balance),
            bet: args.bet.unwrap_or(cfg.bet),
            mines: args.mines.unwrap_or(cfg.mines),
        }
    }

    /// An engine seeded and configured with these settings.
    pub(crate) fn engine(&self) -> Result<Engine, CliError> {
        if !self.balance.is_finite() || self.balance < 0.0 {
            return Err(CliError::InvalidInput(format!(
                "balance must be >= 0, got {}",
                self.balance
            )));
        }
        let mut engine = Engine::new(Some(self.seed), self.balance);
        engine.set_bet(self.bet)?;
        engine.set_mine_count(self.mines)?;
        Ok(engine)
    }
}

pub(crate) fn load_config() -> Result<Config, CliError> {
    Ok(config::load_with_sources()?.config)
}
