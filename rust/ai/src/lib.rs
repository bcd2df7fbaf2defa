//! # neonmines-ai: Automatic Players
//!
//! Strategies that drive a [`neonmines_engine::engine::Engine`] round without a
//! human: each one looks at the current round and picks the next [`Move`].
//!
//! ## Core Components
//!
//! - [`AutoPlayer`] - Trait for move selection
//! - [`players`] - Fixed-target and random-pick implementations
//! - [`create_player`] - Factory parsing strategy names such as `"baseline"` or `"target:5"`
//!
//! ## Quick Start
//!
//! ```rust
//! use neonmines_ai::{create_player, AutoPlayer};
//! use neonmines_engine::engine::{Engine, Move};
//!
//! let player = create_player("baseline").expect("known strategy");
//! let mut engine = Engine::new(Some(42), 1000.0);
//! engine.start(10.0, 3).expect("start");
//!
//! while engine.is_playing() {
//!     match player.next_move(&engine) {
//!         Move::Reveal(index) => {
//!             engine.reveal(index).expect("hidden tile");
//!         }
//!         Move::CashOut => {
//!             engine.cash_out().expect("cash out");
//!         }
//!     }
//! }
//! ```

use neonmines_engine::engine::{Engine, Move};
use thiserror::Error;

pub mod players;

/// Interface for automatic move selection.
///
/// `next_move` is only meaningful while a round is in progress; it never
/// returns [`Move::CashOut`] before the first safe reveal.
pub trait AutoPlayer: Send + Sync {
    /// Pick the next move for the round in progress.
    fn next_move(&self, engine: &Engine) -> Move;

    fn name(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown strategy: {0} (expected cautious, baseline, greedy, target:N or random:N)")]
    UnknownStrategy(String),
    #[error("Invalid parameter for {strategy}: {value}")]
    InvalidParameter { strategy: String, value: String },
}

/// Builds a player from its strategy name.
///
/// # Supported strategies
///
/// - `"cautious"` - one safe reveal, then cash out
/// - `"baseline"` - three safe reveals
/// - `"greedy"` - clear the board
/// - `"target:N"` - N safe reveals in index order
/// - `"random:N"` - N safe reveals on random tiles
///
/// # Example
///
/// ```rust
/// use neonmines_ai::create_player;
///
/// assert_eq!(create_player("target:4").unwrap().name(), "target:4");
/// assert!(create_player("martingale").is_err());
/// ```
pub fn create_player(strategy: &str) -> Result<Box<dyn AutoPlayer>, AiError> {
    create_player_with_seed(strategy, None)
}

/// [`create_player`] with a fixed seed for strategies that pick tiles at random.
pub fn create_player_with_seed(
    strategy: &str,
    seed: Option<u64>,
) -> Result<Box<dyn AutoPlayer>, AiError> {
    let strategy = strategy.trim().to_ascii_lowercase();
    match strategy.as_str() {
        "cautious" => return Ok(Box::new(players::TargetRevealsPlayer::named("cautious", 1))),
        "baseline" => return Ok(Box::new(players::TargetRevealsPlayer::named("baseline", 3))),
        "greedy" => {
            return Ok(Box::new(players::TargetRevealsPlayer::named(
                "greedy",
                players::CLEAR_BOARD,
            )));
        }
        _ => {}
    }

    let (kind, param) = strategy
        .split_once(':')
        .ok_or_else(|| AiError::UnknownStrategy(strategy.clone()))?;
    let target = parse_target(kind, param)?;
    match kind {
        "target" => Ok(Box::new(players::TargetRevealsPlayer::new(target))),
        "random" => Ok(Box::new(players::RandomRevealPlayer::new(target, seed))),
        _ => Err(AiError::UnknownStrategy(strategy.clone())),
    }
}

fn parse_target(kind: &str, param: &str) -> Result<usize, AiError> {
    match param.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AiError::InvalidParameter {
            strategy: kind.to_string(),
            value: param.to_string(),
        }),
    }
}
