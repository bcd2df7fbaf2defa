//! Board, amount, and payout table formatters for terminal display.
//!
//! Revealed tiles use Unicode symbols with an ASCII fallback for terminals
//! that cannot render them:
//!
//! - **Unicode mode**: `◆` for a gem, `✖` for a mine
//! - **ASCII mode**: `G` for a gem, `X` for a mine
//!
//! Hidden tiles show their index so they can be revealed by number.
//!
//! ## Example
//!
//! ```rust
//! use neonmines_cli::formatters::{format_amount, format_multiplier, format_profit};
//!
//! assert_eq!(format_amount(11.25), "11.25");
//! assert_eq!(format_multiplier(1.5), "1.50x");
//! assert_eq!(format_profit(-10.0), "-10.00");
//! ```

use neonmines_engine::grid::{Cell, Grid, GRID_WIDTH};
use neonmines_engine::multiplier::payout_table;

/// Check if the terminal supports Unicode symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Money with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_multiplier(multiplier: f64) -> String {
    format!("{:.2}x", multiplier)
}

/// Signed money, `+` for gains.
pub fn format_profit(profit: f64) -> String {
    if profit >= 0.0 {
        format!("+{:.2}", profit)
    } else {
        format!("{:.2}", profit)
    }
}

fn format_cell(index: usize, cell: Cell, unicode: bool) -> String {
    if !cell.revealed {
        return format!("[{:>2}]", index);
    }
    match (cell.is_gem(), unicode) {
        (true, true) => "[ ◆]".to_string(),
        (false, true) => "[ ✖]".to_string(),
        (true, false) => "[ G]".to_string(),
        (false, false) => "[ X]".to_string(),
    }
}

/// The board as five rows with column and row headers.
pub fn format_grid(grid: &Grid) -> String {
    format_grid_with(grid, supports_unicode())
}

/// [`format_grid`] with the symbol set chosen explicitly.
pub fn format_grid_with(grid: &Grid, unicode: bool) -> String {
    let mut s = String::from("   ");
    for col in 0..GRID_WIDTH {
        s.push_str(&format!("{:^4}", col));
    }
    s.push('\n');
    for (row, cells) in grid.cells().chunks(GRID_WIDTH).enumerate() {
        s.push_str(&format!("{:>2} ", row));
        for (col, &cell) in cells.iter().enumerate() {
            s.push_str(&format_cell(row * GRID_WIDTH + col, cell, unicode));
        }
        s.push('\n');
    }
    s
}

/// Cash-out multipliers and survival odds for every reveal count.
pub fn format_payout_table(mine_count: usize) -> String {
    let mut s = format!("{:>7}  {:>12}  {:>9}\n", "reveals", "multiplier", "chance");
    for row in payout_table(mine_count) {
        s.push_str(&format!(
            "{:>7}  {:>12}  {:>8.2}%\n",
            row.revealed,
            format_multiplier(row.multiplier),
            row.survival * 100.0
        ));
    }
    s
}
