//! # neonmines-engine: Mines Game Engine Core
//!
//! A single-player "Mines" round engine on a 5x5 grid. The player stakes a
//! bet, uncovers tiles that hide either a gem or a mine, and may cash out at
//! any point for the bet times a multiplier that grows with every safe tile.
//! Hitting a mine loses the stake. Mine layouts come from a seeded RNG so
//! sessions are reproducible.
//!
//! ## Core Modules
//!
//! - [`engine`] - Round state machine (start, reveal, cash out, bet controls)
//! - [`multiplier`] - Payout multiplier and survival probability math
//! - [`sampler`] - Uniform mine placement with a seeded ChaCha20 RNG
//! - [`grid`] - The 25-tile board and index/coordinate helpers
//! - [`wallet`] - Player balance
//! - [`rules`] - Bet and mine count validation, bet adjustments
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`stats`] - Aggregate statistics over settled rounds
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use neonmines_engine::engine::Engine;
//!
//! let mut engine = Engine::new(Some(42), 1000.0);
//! engine.start(10.0, 3).unwrap();
//!
//! let first_hidden = engine.grid().hidden_indices().next().unwrap();
//! let outcome = engine.reveal(first_hidden).unwrap();
//! if !outcome.hit_mine {
//!     let paid = engine.cash_out().unwrap();
//!     println!("Cashed out {:.2} at {:.2}x", paid.payout, paid.multiplier);
//! }
//! ```
//!
//! ## Multipliers
//!
//! ```rust
//! use neonmines_engine::multiplier::default_multiplier;
//!
//! // One safe tile with 3 mines pays 0.99 * 25/22
//! let m = default_multiplier(1, 3);
//! assert!((m - 1.125).abs() < 1e-9);
//! ```

pub mod engine;
pub mod errors;
pub mod grid;
pub mod logger;
pub mod multiplier;
pub mod rules;
pub mod sampler;
pub mod stats;
pub mod wallet;
