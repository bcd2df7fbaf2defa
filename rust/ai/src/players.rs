//! Automatic players with a fixed stopping rule.
//!
//! Both players reveal until they reach a target number of safe tiles and then
//! cash out. The target is capped by the safe tiles actually on the board, so
//! a target larger than the board clears it (and the engine settles the round
//! on its own).

use std::sync::Mutex;

use neonmines_engine::engine::{Engine, Move};
use neonmines_engine::rules;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::AutoPlayer;

/// Target meaning "reveal every safe tile".
pub const CLEAR_BOARD: usize = usize::MAX;

/// Safe reveals to aim for on this engine's board, never below one.
fn effective_target(target: usize, engine: &Engine) -> usize {
    target.clamp(1, rules::safe_tiles(engine.mine_count()))
}

fn target_label(target: usize) -> String {
    if target == CLEAR_BOARD {
        "all".to_string()
    } else {
        target.to_string()
    }
}

/// Reveals the lowest-index hidden tile until `target` safe reveals.
///
/// # Example
///
/// ```rust
/// use neonmines_ai::players::TargetRevealsPlayer;
/// use neonmines_ai::AutoPlayer;
/// use neonmines_engine::engine::{Engine, Move};
///
/// let player = TargetRevealsPlayer::new(2);
/// let mut engine = Engine::new(None, 100.0);
/// engine.start_with_layout(10.0, &[10, 11]).unwrap();
///
/// assert_eq!(player.next_move(&engine), Move::Reveal(0));
/// engine.reveal(0).unwrap();
/// engine.reveal(1).unwrap();
/// assert_eq!(player.next_move(&engine), Move::CashOut);
/// ```
#[derive(Debug, Clone)]
pub struct TargetRevealsPlayer {
    name: String,
    target: usize,
}

impl TargetRevealsPlayer {
    pub fn new(target: usize) -> Self {
        Self {
            name: format!("target:{}", target_label(target)),
            target,
        }
    }

    pub(crate) fn named(name: &str, target: usize) -> Self {
        Self {
            name: name.to_string(),
            target,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

impl AutoPlayer for TargetRevealsPlayer {
    fn next_move(&self, engine: &Engine) -> Move {
        if usize::from(engine.safe_revealed()) >= effective_target(self.target, engine) {
            return Move::CashOut;
        }
        match engine.grid().hidden_indices().next() {
            Some(index) => Move::Reveal(index),
            None => Move::CashOut,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Same stopping rule as [`TargetRevealsPlayer`], but picks hidden tiles at
/// random from a seeded ChaCha20 RNG.
#[derive(Debug)]
pub struct RandomRevealPlayer {
    name: String,
    target: usize,
    rng: Mutex<ChaCha20Rng>,
}

impl RandomRevealPlayer {
    /// Seeds from `seed` when given, otherwise draws a fresh random seed.
    pub fn new(target: usize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            name: format!("random:{}", target_label(target)),
            target,
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

impl AutoPlayer for RandomRevealPlayer {
    fn next_move(&self, engine: &Engine) -> Move {
        if usize::from(engine.safe_revealed()) >= effective_target(self.target, engine) {
            return Move::CashOut;
        }
        // a poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        match engine.grid().hidden_indices().choose(&mut *rng) {
            Some(index) => Move::Reveal(index),
            None => Move::CashOut,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_capped_by_safe_tiles() {
        let mut engine = Engine::new(None, 100.0);
        engine.start_with_layout(10.0, &(1..25).collect::<Vec<_>>()).unwrap();
        let player = TargetRevealsPlayer::new(5);
        assert_eq!(effective_target(5, &engine), 1);
        assert_eq!(player.next_move(&engine), Move::Reveal(0));
    }

    #[test]
    fn random_player_only_picks_hidden_tiles() {
        let player = RandomRevealPlayer::new(10, Some(3));
        let mut engine = Engine::new(None, 100.0);
        engine.start_with_layout(10.0, &[0, 1]).unwrap();
        engine.reveal(5).unwrap();
        for _ in 0..50 {
            match player.next_move(&engine) {
                Move::Reveal(i) => assert!(engine.grid().is_hidden(i)),
                Move::CashOut => panic!("target not reached yet"),
            }
        }
    }

    #[test]
    fn labels_use_all_for_clear_board() {
        assert_eq!(TargetRevealsPlayer::new(CLEAR_BOARD).name(), "target:all");
        assert_eq!(RandomRevealPlayer::new(3, Some(1)).name(), "random:3");
    }
}
