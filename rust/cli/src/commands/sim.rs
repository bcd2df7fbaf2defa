//! Automated rounds with an [`AutoPlayer`] strategy.
//!
//! `NEONMINES_SIM_BREAK_AFTER=N` stops the run after `N` rounds and reports
//! it as interrupted; rounds played so far are already in the output file.

use std::io::Write;

use neonmines_ai::{create_player_with_seed, AutoPlayer};
use neonmines_engine::engine::{Engine, Move};
use neonmines_engine::logger::RoundLogger;
use neonmines_engine::stats::SessionStats;
use tracing::info;

use super::{load_config, SessionSettings};
use crate::cli::SessionArgs;
use crate::error::CliError;
use crate::formatters::format_amount;
use crate::ui;

pub fn handle_sim_command(
    rounds: u64,
    strategy: Option<String>,
    session: &SessionArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    let cfg = load_config()?;
    let settings = SessionSettings::resolve(session, &cfg);
    let strategy = strategy.unwrap_or(cfg.strategy);
    let player = create_player_with_seed(&strategy, Some(settings.seed))?;
    let mut engine = settings.engine()?;
    let mut logger = match &session.output {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    let break_after = std::env::var("NEONMINES_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    writeln!(
        out,
        "sim: rounds={} strategy={} seed={} balance={} bet={} mines={}",
        rounds,
        player.name(),
        settings.seed,
        format_amount(settings.balance),
        format_amount(settings.bet),
        settings.mines
    )?;

    let mut stats = SessionStats::new();
    for _ in 0..rounds {
        if engine.balance() < engine.bet_amount() {
            info!(
                balance = engine.balance(),
                bet = engine.bet_amount(),
                played = stats.rounds,
                "sim stopped: bankroll exhausted"
            );
            ui::display_warning(
                err,
                &format!(
                    "Balance {} cannot cover bet {}; stopping after {} round(s)",
                    format_amount(engine.balance()),
                    format_amount(engine.bet_amount()),
                    stats.rounds
                ),
            )?;
            break;
        }

        play_round(&mut engine, player.as_ref())?;

        let id = logger.as_mut().map(RoundLogger::next_id).unwrap_or_default();
        if let Some(mut rec) = engine.record(id) {
            stats.add(&rec);
            if let Some(l) = logger.as_mut() {
                rec.meta = Some(serde_json::json!({ "strategy": player.name() }));
                l.write(&rec)?;
            }
        }

        if let Some(b) = break_after
            && u64::from(stats.rounds) == b
        {
            info!(played = stats.rounds, requested = rounds, "sim interrupted");
            writeln!(out, "Interrupted: saved {}/{}", stats.rounds, rounds)?;
            return Err(CliError::Interrupted(format!(
                "Interrupted: saved {}/{}",
                stats.rounds, rounds
            )));
        }
    }

    info!(
        rounds = stats.rounds,
        wins = stats.wins,
        balance = engine.balance(),
        "sim finished"
    );
    writeln!(out, "Simulated: {} round(s)", stats.rounds)?;
    let mut summary = stats.to_json();
    summary["final_balance"] = serde_json::json!(engine.balance());
    let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Plays one round with the configured bet until it settles.
fn play_round(engine: &mut Engine, player: &dyn AutoPlayer) -> Result<(), CliError> {
    engine.start_configured()?;
    while engine.is_playing() {
        match player.next_move(engine) {
            Move::Reveal(index) => {
                engine.reveal(index)?;
            }
            Move::CashOut => {
                engine.cash_out()?;
            }
        }
    }
    Ok(())
}
