//! Payout table for a mine count.

use std::io::Write;

use neonmines_engine::multiplier::HOUSE_EDGE;
use neonmines_engine::rules;

use crate::error::CliError;
use crate::formatters::format_payout_table;

pub fn handle_odds_command(mines: u8, out: &mut dyn Write) -> Result<(), CliError> {
    let mines = rules::validate_mine_count(mines)?;
    writeln!(
        out,
        "Mines: {} | Safe tiles: {} | House edge: {:.0}%",
        mines,
        rules::safe_tiles(mines),
        (1.0 - HOUSE_EDGE) * 100.0
    )?;
    write!(out, "{}", format_payout_table(usize::from(mines)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_mines_table_has_22_rows() {
        let mut out = Vec::new();
        handle_odds_command(3, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("Mines: 3 | Safe tiles: 22 | House edge: 1%"));
        assert_eq!(output.lines().count(), 1 + 1 + 22);
    }

    #[test]
    fn out_of_range_is_engine_error() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_odds_command(25, &mut out),
            Err(CliError::Engine(_))
        ));
    }
}
