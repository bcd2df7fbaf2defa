//! Replays recorded rounds and checks that they settle the same way.
//!
//! Each round is re-executed on its recorded mine layout with its recorded
//! reveals. A round still in progress after its last reveal was cashed out,
//! so the replay cashes out too. Mine count, result, multiplier, payout and
//! the balance after the round must match.
//!
//! Rounds in a file are one session: each round starts from the previous
//! round's `balance_after`. The first round's starting balance is rebuilt
//! from its own settlement.

use std::io::Write;
use std::path::Path;

use neonmines_engine::engine::Engine;
use neonmines_engine::errors::GameError;
use neonmines_engine::logger::RoundRecord;

use tracing::debug;

use crate::error::{read_failure, CliError};
use crate::formatters::format_amount;
use crate::io_utils::read_text_auto;
use crate::ui;

const TOLERANCE: f64 = 1e-9;

pub fn handle_replay_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = match read_text_auto(Path::new(input)) {
        Ok(c) => c,
        Err(e) => return Err(read_failure(input, e)),
    };

    let mut replayed = 0usize;
    let mut failures = 0usize;
    let mut previous_balance: Option<f64> = None;
    for (n, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let rec: RoundRecord = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                ui::write_error(err, &format!("Failed to parse line {}: {}", n + 1, e))?;
                failures += 1;
                previous_balance = None;
                continue;
            }
        };
        replayed += 1;

        let balance_before =
            previous_balance.unwrap_or(rec.balance_after - rec.payout + rec.bet);
        previous_balance = Some(rec.balance_after);
        match verify_round(&rec, balance_before) {
            Ok(()) => writeln!(
                out,
                "Round {}: OK ({:?}, payout {})",
                rec.round_id,
                rec.result,
                format_amount(rec.payout)
            )?,
            Err(problems) => {
                debug!(round_id = %rec.round_id, ?problems, "replay mismatch");
                failures += 1;
                writeln!(out, "Round {}: MISMATCH", rec.round_id)?;
                for p in problems {
                    writeln!(out, "  {}", p)?;
                }
            }
        }
    }

    writeln!(out, "Replayed: {} round(s), {} problem(s)", replayed, failures)?;
    if failures > 0 {
        return Err(CliError::InvalidInput(format!(
            "replay found {} problem(s)",
            failures
        )));
    }
    Ok(())
}

/// Re-executes one record from `balance_before`; the error lists every
/// discrepancy found.
fn verify_round(rec: &RoundRecord, balance_before: f64) -> Result<(), Vec<String>> {
    if usize::from(rec.mine_count) != rec.mines.len() {
        return Err(vec![format!(
            "mine_count: recorded {}, layout has {}",
            rec.mine_count,
            rec.mines.len()
        )]);
    }

    let mut engine = Engine::new(rec.seed, balance_before);
    let engine_err = |e: GameError| vec![format!("engine rejected replay: {}", e)];

    engine
        .start_with_layout(rec.bet, &rec.mines)
        .map_err(engine_err)?;
    for &index in &rec.reveals {
        if !engine.is_playing() {
            return Err(vec![format!("reveal {} after the round settled", index)]);
        }
        engine.reveal(index).map_err(engine_err)?;
    }
    if engine.is_playing() {
        engine.cash_out().map_err(engine_err)?;
    }

    let replayed = engine
        .record(rec.round_id.clone())
        .ok_or_else(|| vec!["round did not settle".to_string()])?;

    let mut problems = Vec::new();
    if replayed.result != rec.result {
        problems.push(format!(
            "result: recorded {:?}, replayed {:?}",
            rec.result, replayed.result
        ));
    }
    if (replayed.multiplier - rec.multiplier).abs() > TOLERANCE {
        problems.push(format!(
            "multiplier: recorded {}, replayed {}",
            rec.multiplier, replayed.multiplier
        ));
    }
    if (replayed.payout - rec.payout).abs() > TOLERANCE {
        problems.push(format!(
            "payout: recorded {}, replayed {}",
            format_amount(rec.payout),
            format_amount(replayed.payout)
        ));
    }
    if (replayed.balance_after - rec.balance_after).abs() > TOLERANCE {
        problems.push(format!(
            "balance_after: recorded {}, replayed {}",
            format_amount(rec.balance_after),
            format_amount(replayed.balance_after)
        ));
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
