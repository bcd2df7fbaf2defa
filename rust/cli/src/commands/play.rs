//! # Play Command
//!
//! Interactive Mines session driven by line commands on stdin.
//!
//! - Round control: `bet`/`start`, `reveal N` (`r N`, `N`, `r ROW COL`), `cash`
//! - Bet controls between rounds: `half`, `double`, `amount X`, `mines N`
//! - Info: `odds`, `help`; leave with `q`/`quit` or EOF
//!
//! Rejected commands print `Error: ...` and the session continues.

use std::io::{BufRead, Write};

use neonmines_engine::engine::{Engine, PayoutOutcome, RevealOutcome};
use neonmines_engine::errors::GameError;
use neonmines_engine::logger::RoundLogger;
use neonmines_engine::rules::BetAdjustment;
use neonmines_engine::stats::SessionStats;
use tracing::{debug, info};

use super::{load_config, SessionSettings};
use crate::cli::SessionArgs;
use crate::error::CliError;
use crate::formatters::{
    format_amount, format_grid, format_multiplier, format_payout_table, format_profit,
};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{parse_play_input, ParseResult, PlayCommand, PLAY_HELP};

/// What a command did, for rendering.
enum Step {
    Started,
    Revealed(RevealOutcome),
    CashedOut(PayoutOutcome),
    Configured(String),
    Odds,
    Help,
}

/// Handle the play command: an interactive session until `quit` or EOF.
///
/// # Arguments
///
/// * `session` - Seed, balance, bet, mines and output flags
/// * `out` - Output stream for the board and status
/// * `err` - Error stream for rejected commands and warnings
/// * `stdin` - Input stream for player commands
///
/// # Examples
///
/// ```ignore
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("bet\nr 0\ncash\nq\n");
/// handle_play_command(&SessionArgs::default(), &mut out, &mut err, &mut input)?;
/// ```
pub fn handle_play_command(
    session: &SessionArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = load_config()?;
    let settings = SessionSettings::resolve(session, &cfg);
    let mut engine = settings.engine()?;
    let mut logger = match &session.output {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    let mut stats = SessionStats::new();

    writeln!(
        out,
        "play: seed={} balance={} bet={} mines={}",
        settings.seed,
        format_amount(settings.balance),
        format_amount(settings.bet),
        settings.mines
    )?;
    writeln!(out, "{}", PLAY_HELP)?;
    write_status(&engine, out)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        let command = match parse_play_input(&line) {
            ParseResult::Command(c) => c,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                debug!(input = %line, "unparsed play input");
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let step = match apply_command(&mut engine, command) {
            Ok(step) => step,
            Err(e) => {
                ui::write_error(err, &e.to_string())?;
                continue;
            }
        };
        let settled = render_step(&engine, &step, out)?;

        if settled {
            let id = logger.as_mut().map(RoundLogger::next_id).unwrap_or_default();
            if let Some(mut rec) = engine.record(id) {
                stats.add(&rec);
                if let Some(l) = logger.as_mut() {
                    rec.meta = Some(serde_json::json!({ "mode": "play" }));
                    l.write(&rec)?;
                }
            }
        }
    }

    if engine.is_playing() {
        info!(
            stake = engine.bet_amount(),
            safe_revealed = engine.safe_revealed(),
            "round abandoned"
        );
        ui::display_warning(
            err,
            &format!(
                "Round abandoned; stake of {} forfeited",
                format_amount(engine.bet_amount())
            ),
        )?;
    }
    writeln!(
        out,
        "Session over: {} round(s), {} won, net {}, balance {}",
        stats.rounds,
        stats.wins,
        format_profit(stats.net()),
        format_amount(engine.balance())
    )?;
    Ok(())
}

fn apply_command(engine: &mut Engine, command: PlayCommand) -> Result<Step, GameError> {
    match command {
        PlayCommand::Start => engine.start_configured().map(|_| Step::Started),
        PlayCommand::Reveal(index) => engine.reveal(index).map(Step::Revealed),
        PlayCommand::CashOut => engine.cash_out().map(Step::CashedOut),
        PlayCommand::HalveBet => engine
            .adjust_bet(BetAdjustment::Halve)
            .map(|bet| Step::Configured(format!("Bet: {}", format_amount(bet)))),
        PlayCommand::DoubleBet => engine
            .adjust_bet(BetAdjustment::Double)
            .map(|bet| Step::Configured(format!("Bet: {}", format_amount(bet)))),
        PlayCommand::SetBet(amount) => engine
            .set_bet(amount)
            .map(|bet| Step::Configured(format!("Bet: {}", format_amount(bet)))),
        PlayCommand::SetMines(n) => engine
            .set_mine_count(n)
            .map(|m| Step::Configured(format!("Mines: {}", m))),
        PlayCommand::Odds => Ok(Step::Odds),
        PlayCommand::Help => Ok(Step::Help),
    }
}

/// Writes the result of a step; returns whether it settled a round.
fn render_step(engine: &Engine, step: &Step, out: &mut dyn Write) -> Result<bool, CliError> {
    match step {
        Step::Started => {
            writeln!(
                out,
                "Round started: bet {}, {} mines",
                format_amount(engine.bet_amount()),
                engine.mine_count()
            )?;
            write!(out, "{}", format_grid(engine.grid()))?;
            write_status(engine, out)?;
            Ok(false)
        }
        Step::Revealed(outcome) if outcome.hit_mine => {
            write!(out, "{}", format_grid(engine.grid()))?;
            writeln!(out, "{}", ui::loss_banner())?;
            write_status(engine, out)?;
            Ok(true)
        }
        Step::Revealed(outcome) => {
            writeln!(
                out,
                "Gem at {}! Multiplier {}",
                outcome.index,
                format_multiplier(outcome.multiplier)
            )?;
            write!(out, "{}", format_grid(engine.grid()))?;
            if let Some(payout) = outcome.payout {
                writeln!(out, "Board cleared.")?;
                writeln!(out, "{}", ui::win_banner(payout))?;
            }
            write_status(engine, out)?;
            Ok(outcome.round_ended)
        }
        Step::CashedOut(paid) => {
            write!(out, "{}", format_grid(engine.grid()))?;
            writeln!(
                out,
                "Cashed out at {}",
                format_multiplier(paid.multiplier)
            )?;
            writeln!(out, "{}", ui::win_banner(paid.payout))?;
            write_status(engine, out)?;
            Ok(true)
        }
        Step::Configured(msg) => {
            writeln!(out, "{}", msg)?;
            Ok(false)
        }
        Step::Odds => {
            writeln!(out, "Payouts with {} mines:", engine.mine_count())?;
            write!(
                out,
                "{}",
                format_payout_table(usize::from(engine.mine_count()))
            )?;
            Ok(false)
        }
        Step::Help => {
            writeln!(out, "{}", PLAY_HELP)?;
            Ok(false)
        }
    }
}

fn write_status(engine: &Engine, out: &mut dyn Write) -> Result<(), CliError> {
    if engine.is_playing() {
        writeln!(
            out,
            "Balance: {} | Bet: {} | Mines: {} | Multiplier: {} | Profit: {}",
            format_amount(engine.balance()),
            format_amount(engine.bet_amount()),
            engine.mine_count(),
            format_multiplier(engine.current_multiplier()),
            format_profit(engine.current_profit())
        )?;
    } else {
        writeln!(
            out,
            "Balance: {} | Bet: {} | Mines: {}",
            format_amount(engine.balance()),
            format_amount(engine.bet_amount()),
            engine.mine_count()
        )?;
    }
    Ok(())
}
