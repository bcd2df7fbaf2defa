//! Parsing of interactive `play` input.

use neonmines_engine::grid::{coords_to_index, GRID_WIDTH};
use neonmines_engine::rules::MINE_PRESETS;

/// A parsed line of `play` input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayCommand {
    /// Put the configured bet down and start a round
    Start,
    /// Uncover a tile by board index
    Reveal(usize),
    CashOut,
    HalveBet,
    DoubleBet,
    /// Change the configured mine count
    SetMines(u8),
    /// Change the configured bet amount
    SetBet(f64),
    /// Show the payout table for the configured mine count
    Odds,
    Help,
}

/// Outcome of parsing one line of input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const PLAY_HELP: &str = "Commands: bet|start, reveal N|r N|N, r ROW COL, cash, half, double, mines N, amount X, odds, help, q";

/// Parses one line of `play` input (case-insensitive).
///
/// Tiles are addressed by index `0..25` or by zero-based `ROW COL`.
///
/// # Example
///
/// ```rust
/// # use neonmines_cli::validation::{parse_play_input, ParseResult, PlayCommand};
///
/// assert_eq!(parse_play_input("r 7"), ParseResult::Command(PlayCommand::Reveal(7)));
/// assert_eq!(parse_play_input("r 1 2"), ParseResult::Command(PlayCommand::Reveal(7)));
/// assert_eq!(parse_play_input("CASH"), ParseResult::Command(PlayCommand::CashOut));
/// assert_eq!(parse_play_input("q"), ParseResult::Quit);
/// assert!(matches!(parse_play_input("fold"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_input(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    if head == "q" || head == "quit" {
        return ParseResult::Quit;
    }

    // bare tile index
    if let Ok(index) = head.parse::<usize>() {
        return if parts.len() == 1 {
            ParseResult::Command(PlayCommand::Reveal(index))
        } else {
            ParseResult::Invalid("Use 'r ROW COL' to reveal by coordinates".to_string())
        };
    }

    match head {
        "bet" | "start" => ParseResult::Command(PlayCommand::Start),
        "cash" | "cashout" | "c" => ParseResult::Command(PlayCommand::CashOut),
        "half" => ParseResult::Command(PlayCommand::HalveBet),
        "double" => ParseResult::Command(PlayCommand::DoubleBet),
        "odds" => ParseResult::Command(PlayCommand::Odds),
        "help" | "h" | "?" => ParseResult::Command(PlayCommand::Help),
        "reveal" | "r" => parse_reveal(&parts[1..]),
        "mines" => match parts.get(1).map(|s| s.parse::<u8>()) {
            Some(Ok(n)) => ParseResult::Command(PlayCommand::SetMines(n)),
            Some(Err(_)) => ParseResult::Invalid("Invalid mine count".to_string()),
            None => ParseResult::Invalid(format!(
                "Mines requires a count (presets: {:?})",
                MINE_PRESETS
            )),
        },
        "amount" => match parts.get(1).map(|s| s.parse::<f64>()) {
            Some(Ok(x)) => ParseResult::Command(PlayCommand::SetBet(x)),
            Some(Err(_)) => ParseResult::Invalid("Invalid bet amount".to_string()),
            None => {
                ParseResult::Invalid("Amount requires a value (e.g., 'amount 25')".to_string())
            }
        },
        _ => ParseResult::Invalid(format!("Unrecognized command '{}'. {}", head, PLAY_HELP)),
    }
}

fn parse_reveal(args: &[&str]) -> ParseResult {
    match args {
        [index] => match index.parse::<usize>() {
            Ok(i) => ParseResult::Command(PlayCommand::Reveal(i)),
            Err(_) => ParseResult::Invalid("Invalid tile index".to_string()),
        },
        [row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
            (Ok(r), Ok(c)) => match coords_to_index(r, c) {
                Some(i) => ParseResult::Command(PlayCommand::Reveal(i)),
                None => ParseResult::Invalid(format!(
                    "Row and column must be between 0 and {}",
                    GRID_WIDTH - 1
                )),
            },
            _ => ParseResult::Invalid("Invalid coordinates".to_string()),
        },
        _ => ParseResult::Invalid(
            "Reveal requires a tile (e.g., 'r 12' or 'r 2 2')".to_string(),
        ),
    }
}
