//! Statistics aggregation over JSONL round histories.
//!
//! Accepts a single file or a directory (searched recursively for `.jsonl`
//! and `.jsonl.zst`). Lines that fail to parse are skipped and counted: an
//! unterminated final line as incomplete, anything else as corrupted.

use std::io::Write;
use std::path::Path;

use neonmines_engine::logger::RoundRecord;
use neonmines_engine::stats::SessionStats;

use tracing::debug;

use crate::error::{read_failure, CliError};
use crate::io_utils::{collect_history_files, read_text_auto};
use crate::ui;

#[derive(Default)]
struct StatsState {
    stats: SessionStats,
    skipped: u64,
    corrupted: u64,
}

impl StatsState {
    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            match serde_json::from_str::<RoundRecord>(line) {
                Ok(rec) => self.stats.add(&rec),
                Err(_) if i == lines.len() - 1 && !has_trailing_nl => self.skipped += 1,
                Err(_) => self.corrupted += 1,
            }
        }
    }
}

/// Aggregates round histories at `input` and prints the totals as JSON.
///
/// # Errors
///
/// Fails when `input` cannot be read, or when a single file contains no
/// valid record but some invalid ones.
pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState::default();

    if path.is_dir() {
        for file in collect_history_files(path) {
            match read_text_auto(&file) {
                Ok(content) => state.consume(&content),
                Err(e) => {
                    ui::display_warning(
                        err,
                        &format!("Failed to read {}: {}", file.display(), e),
                    )?;
                    state.corrupted += 1;
                }
            }
        }
    } else {
        match read_text_auto(path) {
            Ok(content) => state.consume(&content),
            Err(e) => return Err(read_failure(input, e)),
        }
    }

    debug!(
        rounds = state.stats.rounds,
        corrupted = state.corrupted,
        skipped = state.skipped,
        "history aggregated"
    );
    if state.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.stats.rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let json = serde_json::to_string_pretty(&state.stats.to_json())
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIN: &str = r#"{"round_id":"20260101-000001","seed":1,"bet":10.0,"mine_count":3,"mines":[0,1,2],"reveals":[5],"result":"win","multiplier":1.125,"payout":11.25,"balance_after":1001.25,"ts":null,"meta":null}"#;

    #[test]
    fn empty_file_has_zero_rounds() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_stats_command(temp.path().to_str().unwrap(), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("\"rounds\": 0"));
        assert!(output.contains("\"rtp\": null"));
    }

    #[test]
    fn incomplete_last_line_is_discarded() {
        let mut state = StatsState::default();
        state.consume(&format!("{}\n{}", WIN, &WIN[..40]));
        assert_eq!(state.stats.rounds, 1);
        assert_eq!(state.skipped, 1);
        assert_eq!(state.corrupted, 0);
    }

    #[test]
    fn garbage_in_the_middle_is_corrupted() {
        let mut state = StatsState::default();
        state.consume(&format!("{}\nnot json\n{}\n", WIN, WIN));
        assert_eq!(state.stats.rounds, 2);
        assert_eq!(state.corrupted, 1);
    }

    #[test]
    fn file_with_only_garbage_fails() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "oops\n").unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_stats_command(temp.path().to_str().unwrap(), &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
