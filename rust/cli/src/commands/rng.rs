//! Mine sampler distribution check.
//!
//! Samples many layouts from the seeded ChaCha20 sampler and reports how
//! often each tile held a mine, against the uniform expectation
//! `trials × mines / 25`.

use std::io::Write;

use neonmines_engine::grid::{GRID_SIZE, GRID_WIDTH};
use neonmines_engine::rules;
use neonmines_engine::sampler::MineSampler;

use crate::error::CliError;

/// Per-tile mine counts and the largest relative deviation from uniform.
pub(crate) fn tile_frequencies(seed: u64, mines: u8, trials: u32) -> ([u32; GRID_SIZE], f64) {
    let mut sampler = MineSampler::new_with_seed(seed);
    let mut counts = [0u32; GRID_SIZE];
    for _ in 0..trials {
        for index in sampler.sample(usize::from(mines)) {
            counts[index] += 1;
        }
    }
    let expected = f64::from(trials) * f64::from(mines) / GRID_SIZE as f64;
    let max_dev = counts
        .iter()
        .map(|&c| (f64::from(c) - expected).abs() / expected)
        .fold(0.0, f64::max);
    (counts, max_dev)
}

pub fn handle_rng_command(
    seed: Option<u64>,
    mines: u8,
    trials: u32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mines = rules::validate_mine_count(mines)?;
    if trials == 0 {
        return Err(CliError::InvalidInput("trials must be >= 1".to_string()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let (counts, max_dev) = tile_frequencies(seed, mines, trials);

    writeln!(out, "RNG check: seed={} mines={} trials={}", seed, mines, trials)?;
    for row in counts.chunks(GRID_WIDTH) {
        let line: Vec<String> = row.iter().map(|c| format!("{:>7}", c)).collect();
        writeln!(out, "{}", line.join(""))?;
    }
    writeln!(
        out,
        "Expected per tile: {:.1}",
        f64::from(trials) * f64::from(mines) / GRID_SIZE as f64
    )?;
    writeln!(out, "Max deviation: {:.2}%", max_dev * 100.0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_add_up_to_trials_times_mines() {
        let (counts, _) = tile_frequencies(7, 5, 1000);
        assert_eq!(counts.iter().sum::<u32>(), 5000);
    }

    #[test]
    fn deviation_is_small_for_many_trials() {
        let (_, dev) = tile_frequencies(99, 3, 20_000);
        assert!(dev < 0.1, "deviation {}", dev);
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_rng_command(Some(42), 3, 500, &mut a).unwrap();
        handle_rng_command(Some(42), 3, 500, &mut b).unwrap();
        assert_eq!(a, b);
        assert!(String::from_utf8(a).unwrap().contains("Max deviation"));
    }

    #[test]
    fn zero_trials_rejected() {
        let mut out = Vec::new();
        assert!(handle_rng_command(Some(1), 3, 0, &mut out).is_err());
    }
}
