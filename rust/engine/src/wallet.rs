use serde::{Deserialize, Serialize};

use crate::errors::{GameError, Result};

/// Balance a player starts a session with.
pub const STARTING_BALANCE: f64 = 1000.0;

/// Player funds for a session.
/// Only the round engine debits stakes and credits payouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Wallet {
    pub fn new(balance: f64) -> Self {
        Self {
            balance: balance.max(0.0),
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn can_cover(&self, amount: f64) -> bool {
        amount <= self.balance
    }

    /// Takes a stake out of the wallet.
    ///
    /// # Errors
    ///
    /// [`GameError::InsufficientFunds`] when `amount` exceeds the balance; the
    /// balance is unchanged in that case.
    pub fn debit(&mut self, amount: f64) -> Result<()> {
        if !self.can_cover(amount) {
            return Err(GameError::InsufficientFunds {
                bet: amount,
                balance: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }
}
