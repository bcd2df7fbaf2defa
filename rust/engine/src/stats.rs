use serde::Serialize;

use crate::engine::RoundResult;
use crate::logger::RoundRecord;

/// Running totals over a set of settled rounds.
///
/// # Examples
///
/// ```
/// use neonmines_engine::stats::SessionStats;
///
/// let stats = SessionStats::default();
/// assert_eq!(stats.rounds, 0);
/// assert_eq!(stats.rtp(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    /// Sum of all stakes
    pub wagered: f64,
    /// Sum of all payouts
    pub paid_out: f64,
    /// Highest multiplier any round was settled at
    pub best_multiplier: f64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one settled round.
    pub fn record(&mut self, bet: f64, result: RoundResult, multiplier: f64, payout: f64) {
        self.rounds += 1;
        match result {
            RoundResult::Win => self.wins += 1,
            RoundResult::Loss => self.losses += 1,
        }
        self.wagered += bet;
        self.paid_out += payout;
        if multiplier > self.best_multiplier {
            self.best_multiplier = multiplier;
        }
    }

    pub fn add(&mut self, rec: &RoundRecord) {
        self.record(rec.bet, rec.result, rec.multiplier, rec.payout);
    }

    /// Paid out minus wagered.
    pub fn net(&self) -> f64 {
        self.paid_out - self.wagered
    }

    /// Return to player; `None` until something has been wagered.
    pub fn rtp(&self) -> Option<f64> {
        if self.wagered > 0.0 {
            Some(self.paid_out / self.wagered)
        } else {
            None
        }
    }

    pub fn win_rate(&self) -> Option<f64> {
        if self.rounds == 0 {
            None
        } else {
            Some(f64::from(self.wins) / f64::from(self.rounds))
        }
    }

    /// Summary as a JSON object, including the derived figures.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rounds": self.rounds,
            "wins": self.wins,
            "losses": self.losses,
            "wagered": self.wagered,
            "paid_out": self.paid_out,
            "net": self.net(),
            "best_multiplier": self.best_multiplier,
            "win_rate": self.win_rate(),
            "rtp": self.rtp(),
        })
    }
}

impl<'a> FromIterator<&'a RoundRecord> for SessionStats {
    fn from_iter<I: IntoIterator<Item = &'a RoundRecord>>(iter: I) -> Self {
        let mut stats = SessionStats::new();
        for rec in iter {
            stats.add(rec);
        }
        stats
    }
}
