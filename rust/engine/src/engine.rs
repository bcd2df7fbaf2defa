use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{GameError, Result};
use crate::grid::{Cell, Grid, MineSet};
use crate::logger::RoundRecord;
use crate::multiplier::{default_multiplier, profit};
use crate::rules::{self, BetAdjustment};
use crate::sampler::MineSampler;
use crate::wallet::{Wallet, STARTING_BALANCE};

/// Bet amount a fresh engine is configured with.
pub const DEFAULT_BET: f64 = 10.0;

/// Mine count a fresh engine is configured with.
pub const DEFAULT_MINES: u8 = 3;

/// Phase of the current round.
/// `Idle` and `Ended` both accept configuration changes and a new start.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundState {
    /// No round has been played yet
    #[default]
    Idle,
    /// Stake is down and tiles can be revealed
    Playing,
    /// The last round has been settled
    Ended,
}

impl RoundState {
    pub fn is_playing(self) -> bool {
        matches!(self, RoundState::Playing)
    }
}

/// How a settled round finished.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundResult {
    /// Cashed out (voluntarily or by clearing the board)
    Win,
    /// Revealed a mine
    Loss,
}

/// Read-only view of the engine's round and session state.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Current phase
    pub state: RoundState,
    /// Stake of the current round, or the configured stake between rounds
    pub bet_amount: f64,
    /// Mines on the board, or the configured count between rounds
    pub mine_count: u8,
    /// Safe tiles revealed in the current or last round
    pub safe_revealed: u8,
    /// Wallet balance after any debit/credit so far
    pub balance: f64,
    /// Outcome of the last settled round, cleared when a new one starts
    pub last_result: Option<RoundResult>,
    /// Amount credited by the last settled round (0 for a loss)
    pub payout: f64,
}

/// Result of a single tile reveal.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealOutcome {
    /// Tile that was revealed
    pub index: usize,
    /// Whether the tile held a mine
    pub hit_mine: bool,
    /// Multiplier after this reveal (0 when a mine was hit)
    pub multiplier: f64,
    /// Whether this reveal settled the round
    pub round_ended: bool,
    /// Amount credited when the reveal cleared the board
    pub payout: Option<f64>,
}

/// Result of a successful cash-out.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutOutcome {
    /// Multiplier the stake was settled at
    pub multiplier: f64,
    /// Amount credited to the wallet
    pub payout: f64,
    /// Balance after the credit
    pub balance: f64,
}

/// A player decision during a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Move {
    /// Uncover the tile at this index
    Reveal(usize),
    /// Settle the stake at the current multiplier
    CashOut,
}

/// Round engine: owns the wallet, the board and the round state machine.
///
/// `Idle --start--> Playing --reveal(mine)--> Ended(Loss)`,
/// `Playing --cash_out / reveal(last safe tile)--> Ended(Win)`,
/// `Ended --start--> Playing`.
///
/// # Examples
///
/// ```
/// use neonmines_engine::engine::{Engine, RoundResult, RoundState};
///
/// let mut engine = Engine::new(Some(7), 1000.0);
/// // Mines at 0, 1 and 2; tile 10 is safe.
/// engine.start_with_layout(10.0, &[0, 1, 2]).unwrap();
/// assert_eq!(engine.round().balance, 990.0);
///
/// let outcome = engine.reveal(10).unwrap();
/// assert!(!outcome.hit_mine);
///
/// let paid = engine.cash_out().unwrap();
/// assert!((paid.payout - 11.25).abs() < 1e-9);
/// assert_eq!(engine.round().state, RoundState::Ended);
/// assert_eq!(engine.round().last_result, Some(RoundResult::Win));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    /// Source of mine layouts
    sampler: MineSampler,
    /// Player funds
    wallet: Wallet,
    /// Board of the current or last round
    grid: Grid,
    state: RoundState,
    /// Configured bet for the next round
    bet_amount: f64,
    /// Configured mine count for the next round
    mine_count: u8,
    /// Stake of the current or last round, fixed at start
    round_bet: f64,
    /// Mines of the current or last round, fixed at start
    round_mines: u8,
    safe_revealed: u8,
    last_result: Option<RoundResult>,
    payout: f64,
    /// Multiplier the last round was settled at (0 for a loss)
    settled_multiplier: f64,
    /// Player reveals of the current or last round, in order
    reveals: Vec<usize>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(None, STARTING_BALANCE)
    }
}

impl Engine {
    pub fn new(seed: Option<u64>, starting_balance: f64) -> Self {
        Self {
            sampler: MineSampler::new(seed),
            wallet: Wallet::new(starting_balance),
            grid: Grid::default(),
            state: RoundState::Idle,
            bet_amount: DEFAULT_BET,
            mine_count: DEFAULT_MINES,
            round_bet: DEFAULT_BET,
            round_mines: DEFAULT_MINES,
            safe_revealed: 0,
            last_result: None,
            payout: 0.0,
            settled_multiplier: 0.0,
            reveals: Vec::new(),
        }
    }

    /// Puts `bet_amount` down and starts a round on a freshly sampled board.
    ///
    /// The bet and mine count become the engine's configured values.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidMove`] while a round is in progress
    /// - [`GameError::InvalidConfiguration`] for a non-positive bet or a mine
    ///   count outside `2..=24`
    /// - [`GameError::InsufficientFunds`] when the bet exceeds the balance
    pub fn start(&mut self, bet_amount: f64, mine_count: u8) -> Result<Round> {
        self.check_not_playing("round already in progress")?;
        let bet_amount = rules::validate_bet(bet_amount)?;
        let mine_count = rules::validate_mine_count(mine_count)?;
        self.wallet.debit(bet_amount)?;
        let mines = self.sampler.sample(usize::from(mine_count));
        Ok(self.begin_round(bet_amount, mine_count, mines))
    }

    /// Starts a round with the currently configured bet and mine count.
    pub fn start_configured(&mut self) -> Result<Round> {
        self.start(self.bet_amount, self.mine_count)
    }

    /// Starts a round on an explicit mine layout instead of a sampled one.
    /// Used to replay recorded rounds.
    pub fn start_with_layout(&mut self, bet_amount: f64, mines: &[usize]) -> Result<Round> {
        self.check_not_playing("round already in progress")?;
        let bet_amount = rules::validate_bet(bet_amount)?;
        let mines = rules::validate_layout(mines)?;
        let mine_count = u8::try_from(mines.len())
            .map_err(|_| GameError::invalid_config("mine layout is too large"))?;
        self.wallet.debit(bet_amount)?;
        Ok(self.begin_round(bet_amount, mine_count, mines))
    }

    /// Uncovers one tile.
    ///
    /// A mine settles the round as a loss. Uncovering the last safe tile
    /// settles it as a win at the multiplier for a cleared board.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidMove`] when no round is in progress, the index is
    /// off the board, or the tile is already uncovered.
    pub fn reveal(&mut self, index: usize) -> Result<RevealOutcome> {
        self.check_playing()?;
        let cell = self.grid.reveal(index).inspect_err(|e| {
            debug!(index, error = %e, "reveal rejected");
        })?;
        self.reveals.push(index);

        if cell.is_mine {
            debug!(index, "mine hit");
            self.settle(RoundResult::Loss, 0.0, 0.0);
            return Ok(RevealOutcome {
                index,
                hit_mine: true,
                multiplier: 0.0,
                round_ended: true,
                payout: None,
            });
        }

        self.safe_revealed += 1;
        let multiplier = self.current_multiplier();
        debug!(index, safe_revealed = self.safe_revealed, multiplier, "safe tile");

        if usize::from(self.safe_revealed) == rules::safe_tiles(self.round_mines) {
            let payout = self.pay_out(multiplier);
            return Ok(RevealOutcome {
                index,
                hit_mine: false,
                multiplier,
                round_ended: true,
                payout: Some(payout),
            });
        }

        Ok(RevealOutcome {
            index,
            hit_mine: false,
            multiplier,
            round_ended: false,
            payout: None,
        })
    }

    /// Settles the stake at the current multiplier.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidMove`] when no round is in progress
    /// - [`GameError::NothingToCashOut`] before the first safe reveal
    pub fn cash_out(&mut self) -> Result<PayoutOutcome> {
        self.check_playing()?;
        if self.safe_revealed == 0 {
            debug!("cash out rejected before first reveal");
            return Err(GameError::NothingToCashOut);
        }
        let multiplier = self.current_multiplier();
        let payout = self.pay_out(multiplier);
        Ok(PayoutOutcome {
            multiplier,
            payout,
            balance: self.wallet.balance(),
        })
    }

    /// Halves or doubles the configured bet between rounds.
    pub fn adjust_bet(&mut self, kind: BetAdjustment) -> Result<f64> {
        self.check_not_playing("bet cannot change during a round")?;
        self.bet_amount = kind.apply(self.bet_amount);
        Ok(self.bet_amount)
    }

    /// Sets the configured bet between rounds.
    pub fn set_bet(&mut self, amount: f64) -> Result<f64> {
        self.check_not_playing("bet cannot change during a round")?;
        self.bet_amount = rules::validate_bet(amount)?;
        Ok(self.bet_amount)
    }

    /// Sets the configured mine count between rounds.
    pub fn set_mine_count(&mut self, mines: u8) -> Result<u8> {
        self.check_not_playing("mine count cannot change during a round")?;
        self.mine_count = rules::validate_mine_count(mines)?;
        Ok(self.mine_count)
    }

    pub fn round(&self) -> Round {
        Round {
            state: self.state,
            bet_amount: self.bet_amount,
            mine_count: self.mine_count,
            safe_revealed: self.safe_revealed,
            balance: self.wallet.balance(),
            last_result: self.last_result,
            payout: self.payout,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn balance(&self) -> f64 {
        self.wallet.balance()
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn mine_count(&self) -> u8 {
        self.mine_count
    }

    pub fn safe_revealed(&self) -> u8 {
        self.safe_revealed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.grid.cell(index)
    }

    /// Player reveals of the current or last round, in order.
    pub fn reveals(&self) -> &[usize] {
        &self.reveals
    }

    /// Seed of the mine sampler, enough to reproduce the session's layouts.
    pub fn seed(&self) -> u64 {
        self.sampler.seed()
    }

    /// Mine layout of the last round; hidden while a round is in progress.
    pub fn mine_positions(&self) -> Option<MineSet> {
        match self.state {
            RoundState::Ended => Some(self.grid.mine_positions()),
            RoundState::Idle | RoundState::Playing => None,
        }
    }

    /// Multiplier for the safe tiles revealed so far (1.0 before the first).
    ///
    /// Uses the mine count of the current or last round, so configuring the
    /// next round never changes it.
    pub fn current_multiplier(&self) -> f64 {
        default_multiplier(
            usize::from(self.safe_revealed),
            usize::from(self.round_mines),
        )
    }

    /// What cashing out now would pay.
    pub fn potential_payout(&self) -> f64 {
        self.round_bet * self.current_multiplier()
    }

    /// What cashing out now would gain over the stake.
    pub fn current_profit(&self) -> f64 {
        profit(self.round_bet, self.current_multiplier())
    }

    /// Snapshot of the last settled round, `None` unless a round has ended.
    pub fn record(&self, round_id: impl Into<String>) -> Option<RoundRecord> {
        let result = match self.state {
            RoundState::Ended => self.last_result?,
            RoundState::Idle | RoundState::Playing => return None,
        };
        Some(RoundRecord {
            round_id: round_id.into(),
            seed: Some(self.sampler.seed()),
            bet: self.round_bet,
            mine_count: self.round_mines,
            mines: self.grid.mine_positions().into_iter().collect(),
            reveals: self.reveals.clone(),
            result,
            multiplier: self.settled_multiplier,
            payout: self.payout,
            balance_after: self.wallet.balance(),
            ts: None,
            meta: None,
        })
    }

    fn begin_round(&mut self, bet_amount: f64, mine_count: u8, mines: MineSet) -> Round {
        self.bet_amount = bet_amount;
        self.mine_count = mine_count;
        self.round_bet = bet_amount;
        self.round_mines = mine_count;
        self.grid = Grid::from_mines(&mines);
        self.safe_revealed = 0;
        self.state = RoundState::Playing;
        self.last_result = None;
        self.payout = 0.0;
        self.settled_multiplier = 0.0;
        self.reveals.clear();
        debug!(
            bet = bet_amount,
            mines = mine_count,
            balance = self.wallet.balance(),
            "round started"
        );
        self.round()
    }

    fn pay_out(&mut self, multiplier: f64) -> f64 {
        let payout = self.round_bet * multiplier;
        self.wallet.credit(payout);
        self.settle(RoundResult::Win, multiplier, payout);
        payout
    }

    fn settle(&mut self, result: RoundResult, multiplier: f64, payout: f64) {
        self.state = RoundState::Ended;
        self.last_result = Some(result);
        self.payout = payout;
        self.settled_multiplier = multiplier;
        self.grid.reveal_all();
        info!(
            result = ?result,
            multiplier,
            payout,
            balance = self.wallet.balance(),
            "round settled"
        );
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            debug!(state = ?self.state, "operation rejected: no round in progress");
            Err(GameError::invalid_move("no round in progress"))
        }
    }

    fn check_not_playing(&self, reason: &'static str) -> Result<()> {
        if self.state.is_playing() {
            debug!(reason, "operation rejected during round");
            Err(GameError::invalid_move(reason))
        } else {
            Ok(())
        }
    }
}
