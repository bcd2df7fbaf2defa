use std::io::Write;
use std::process::{Command, Stdio};

use neonmines_engine::engine::RoundResult;
use neonmines_engine::logger::RoundRecord;

fn play(args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_neonmines"))
        .arg("play")
        .args(args)
        .env_remove("NEONMINES_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn neonmines");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

/// Reveals every tile in order; the first mine ends the round.
fn reveal_everything() -> String {
    let mut input = String::from("bet\n");
    for i in 0..25 {
        input.push_str(&format!("r {}\n", i));
    }
    input.push_str("q\n");
    input
}

#[test]
fn eof_ends_session_gracefully() {
    let (code, out, err) = play(&["--seed", "1"], "");
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Session over: 0 round(s)"));
}

#[test]
fn revealing_every_tile_hits_a_mine_and_logs_the_round() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("play.jsonl");
    let (code, out, err) = play(
        &[
            "--seed",
            "11",
            "--balance",
            "50",
            "--mines",
            "10",
            "--output",
            path.to_str().unwrap(),
        ],
        &reveal_everything(),
    );
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("*** BOOM! GAME OVER ***"));
    assert!(out.contains("Session over: 1 round(s), 0 won, net -10.00, balance 40.00"));
    // reveals after the loss are rejected without ending the session
    assert!(err.contains("Error: Invalid move"));

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<RoundRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec.result, RoundResult::Loss);
    assert_eq!(rec.payout, 0.0);
    assert_eq!(rec.mines.len(), 10);
    assert_eq!(rec.reveals.last(), rec.mines.first());
    assert_eq!(rec.meta.as_ref().unwrap()["mode"], "play");
    assert!(rec.ts.is_some());
}

#[test]
fn abandoned_round_warns_and_keeps_stake() {
    let (code, out, err) = play(&["--seed", "3", "--balance", "100"], "bet\n");
    assert_eq!(code, 0);
    assert!(err.contains("WARNING: Round abandoned; stake of 10.00 forfeited"));
    assert!(out.contains("balance 90.00"));
}

#[test]
fn bet_controls_between_rounds() {
    let (code, out, err) = play(
        &["--seed", "5", "--bet", "8"],
        "half\ndouble\ndouble\namount 2.5\nmines 10\nq\n",
    );
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Bet: 4.00"));
    assert!(out.contains("Bet: 16.00"));
    assert!(out.contains("Bet: 2.50"));
    assert!(out.contains("Mines: 10"));
    assert!(err.is_empty());
}

#[test]
fn invalid_flag_fails_before_reading_input() {
    let (code, out, err) = play(&["--bet", "0"], "bet\n");
    assert_eq!(code, 2);
    assert!(!out.contains("play:"));
    assert!(err.contains("Error: "));
}
