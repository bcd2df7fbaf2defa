//! Payout multiplier math.
//!
//! The multiplier for `k` safe reveals is the inverse of the probability of
//! drawing `k` safe tiles in a row without replacement, scaled down by the
//! house edge. Everything here is pure; rounding happens only at display time.

use serde::{Deserialize, Serialize};

use crate::grid::GRID_SIZE;

/// Fraction of the fair payout returned to the player (1% house edge).
pub const HOUSE_EDGE: f64 = 0.99;

/// Payout multiplier after `revealed` safe tiles on a board of `grid_size`
/// tiles holding `mine_count` mines.
///
/// Returns exactly `1.0` when nothing has been revealed. Inputs must satisfy
/// `revealed <= grid_size - mine_count` and `1 <= mine_count < grid_size`;
/// the round engine guarantees this through its own invariants.
///
/// # Examples
///
/// ```
/// use neonmines_engine::multiplier::{multiplier, HOUSE_EDGE};
///
/// assert_eq!(multiplier(0, 3, 25, HOUSE_EDGE), 1.0);
/// let one = multiplier(1, 3, 25, HOUSE_EDGE);
/// assert!((one - 0.99 * 25.0 / 22.0).abs() < 1e-12);
/// ```
pub fn multiplier(revealed: usize, mine_count: usize, grid_size: usize, house_edge: f64) -> f64 {
    if revealed == 0 {
        return 1.0;
    }
    let total = grid_size as f64;
    let safe = (grid_size - mine_count) as f64;
    let fair = (0..revealed).fold(1.0, |acc, i| {
        let i = i as f64;
        acc * ((total - i) / (safe - i))
    });
    fair * house_edge
}

/// [`multiplier`] on the standard 25-tile board with the standard house edge.
pub fn default_multiplier(revealed: usize, mine_count: usize) -> f64 {
    multiplier(revealed, mine_count, GRID_SIZE, HOUSE_EDGE)
}

/// Probability that `revealed` consecutive picks all land on safe tiles.
pub fn survival_probability(revealed: usize, mine_count: usize, grid_size: usize) -> f64 {
    let total = grid_size as f64;
    let safe = (grid_size - mine_count) as f64;
    (0..revealed).fold(1.0, |acc, i| {
        let i = i as f64;
        acc * (safe - i) / (total - i)
    })
}

/// Net gain of a bet settled at `multiplier` (negative when below 1.0).
pub fn profit(bet: f64, multiplier: f64) -> f64 {
    bet * multiplier - bet
}

/// One line of the payout table shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutRow {
    /// Number of safe tiles revealed
    pub revealed: usize,
    /// Multiplier paid when cashing out at this point
    pub multiplier: f64,
    /// Chance of getting this far from a fresh board
    pub survival: f64,
}

/// Every reachable cash-out point for a mine count on the standard board,
/// from one safe reveal up to a cleared board.
pub fn payout_table(mine_count: usize) -> Vec<PayoutRow> {
    let max_safe = GRID_SIZE.saturating_sub(mine_count);
    (1..=max_safe)
        .map(|revealed| PayoutRow {
            revealed,
            multiplier: default_multiplier(revealed, mine_count),
            survival: survival_probability(revealed, mine_count, GRID_SIZE),
        })
        .collect()
}
