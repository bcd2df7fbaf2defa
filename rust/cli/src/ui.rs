//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Banner printed when a round is won.
pub fn win_banner(payout: f64) -> String {
    format!("*** YOU WON {:.2}! ***", payout)
}

/// Banner printed when a mine is hit.
pub fn loss_banner() -> &'static str {
    "*** BOOM! GAME OVER ***"
}
