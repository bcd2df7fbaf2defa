use serde::{Deserialize, Serialize};

use crate::errors::{GameError, Result};
use crate::grid::{MineSet, GRID_SIZE};

/// Fewest mines a round may be played with.
pub const MIN_MINES: u8 = 2;

/// Most mines a round may be played with (leaves a single safe tile).
pub const MAX_MINES: u8 = 24;

/// Mine counts offered as one-click presets.
pub const MINE_PRESETS: [u8; 4] = [3, 5, 10, 24];

/// Smallest bet reachable by halving.
pub const MIN_HALVED_BET: f64 = 1.0;

/// Quick bet adjustments available between rounds.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum BetAdjustment {
    /// Halve the bet, rounding down, never below 1
    Halve,
    /// Double the bet
    Double,
}

impl BetAdjustment {
    pub fn apply(self, bet: f64) -> f64 {
        match self {
            BetAdjustment::Halve => (bet / 2.0).floor().max(MIN_HALVED_BET),
            BetAdjustment::Double => bet * 2.0,
        }
    }
}

/// Checks that a bet is a finite, strictly positive amount.
///
/// # Examples
///
/// ```
/// use neonmines_engine::rules::validate_bet;
/// use neonmines_engine::errors::GameError;
///
/// assert_eq!(validate_bet(10.0), Ok(10.0));
/// assert!(matches!(validate_bet(0.0), Err(GameError::InvalidConfiguration { .. })));
/// assert!(matches!(validate_bet(f64::NAN), Err(GameError::InvalidConfiguration { .. })));
/// ```
pub fn validate_bet(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(GameError::invalid_config("bet amount must be a finite number"));
    }
    if amount <= 0.0 {
        return Err(GameError::invalid_config(format!(
            "bet amount must be positive, got {:.2}",
            amount
        )));
    }
    Ok(amount)
}

/// Checks that a mine count lies within `MIN_MINES..=MAX_MINES`.
pub fn validate_mine_count(mines: u8) -> Result<u8> {
    if (MIN_MINES..=MAX_MINES).contains(&mines) {
        Ok(mines)
    } else {
        Err(GameError::invalid_config(format!(
            "mine count must be between {} and {}, got {}",
            MIN_MINES, MAX_MINES, mines
        )))
    }
}

/// Checks an explicit mine layout: distinct on-board indices with a legal count.
pub fn validate_layout(mines: &[usize]) -> Result<MineSet> {
    if let Some(&bad) = mines.iter().find(|&&i| i >= GRID_SIZE) {
        return Err(GameError::invalid_config(format!(
            "mine index {} is off the board",
            bad
        )));
    }
    let set: MineSet = mines.iter().copied().collect();
    if set.len() != mines.len() {
        return Err(GameError::invalid_config("mine layout contains duplicates"));
    }
    let count = u8::try_from(set.len())
        .map_err(|_| GameError::invalid_config("mine layout is too large"))?;
    validate_mine_count(count)?;
    Ok(set)
}

/// Number of safe tiles on the standard board for a mine count.
pub fn safe_tiles(mines: u8) -> usize {
    GRID_SIZE - mines as usize
}
