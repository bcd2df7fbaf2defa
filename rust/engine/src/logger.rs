use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::RoundResult;

/// Complete record of a settled round.
/// Serialized one per line to JSONL round histories; enough to replay the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the session's mine sampler
    pub seed: Option<u64>,
    /// Stake put down at start
    pub bet: f64,
    pub mine_count: u8,
    /// Mine layout, ascending
    pub mines: Vec<usize>,
    /// Tiles the player revealed, in order
    pub reveals: Vec<usize>,
    pub result: RoundResult,
    /// Multiplier the round was settled at (0 for a loss)
    pub multiplier: f64,
    /// Amount credited at settlement
    pub payout: f64,
    /// Wallet balance after settlement
    pub balance_after: f64,
    /// Timestamp when the round was settled (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (strategy name, etc.)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl RoundRecord {
    pub fn is_win(&self) -> bool {
        self.result == RoundResult::Win
    }

    /// Number of safe tiles uncovered before settlement.
    pub fn safe_revealed(&self) -> usize {
        self.reveals
            .iter()
            .filter(|&&i| self.mines.binary_search(&i).is_err())
            .count()
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`RoundRecord`]s to a JSONL file and hands out round IDs.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Creates (truncating) the file at `path`, making parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that numbers rounds but writes nowhere.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
