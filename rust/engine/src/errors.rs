use thiserror::Error;

/// Errors returned by round engine operations.
///
/// Every variant is recoverable: the engine state is left exactly as it was
/// before the rejected call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("Insufficient funds: bet {bet:.2} exceeds balance {balance:.2}")]
    InsufficientFunds { bet: f64, balance: f64 },
    #[error("Invalid move: {reason}")]
    InvalidMove { reason: &'static str },
    #[error("Nothing to cash out: reveal at least one tile first")]
    NothingToCashOut,
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl GameError {
    pub(crate) fn invalid_move(reason: &'static str) -> Self {
        GameError::InvalidMove { reason }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        GameError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
