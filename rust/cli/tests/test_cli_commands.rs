use neonmines_cli::run;

fn run_capture(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn odds_prints_header_and_every_reveal_count() {
    let (code, out, err) = run_capture(&["neonmines", "odds", "--mines", "3"]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Mines: 3 | Safe tiles: 22 | House edge: 1%"));
    assert!(out.contains("2277.00x"), "clearing the board pays 0.99 * C(25, 3)");
    assert!(out.lines().count() >= 22);
}

#[test]
fn odds_rejects_out_of_range_mines() {
    for mines in ["1", "25"] {
        let (code, out, err) = run_capture(&["neonmines", "odds", "--mines", mines]);
        assert_eq!(code, 2, "mines {}", mines);
        assert!(out.is_empty());
        assert!(err.contains("Commands:"));
    }
}

#[test]
fn rng_is_deterministic_for_a_seed() {
    let args = ["neonmines", "rng", "--seed", "7", "--trials", "2000"];
    let (code_a, out_a, _) = run_capture(&args);
    let (code_b, out_b, _) = run_capture(&args);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    assert_eq!(out_a, out_b);
    assert!(out_a.contains("RNG check: seed=7 mines=3 trials=2000"));
    assert!(out_a.contains("Expected per tile: 240.0"));
}

#[test]
fn version_flag_succeeds() {
    let (code, out, _) = run_capture(&["neonmines", "--version"]);
    assert_eq!(code, 0);
    assert!(out.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_command_is_an_error() {
    let (code, out, err) = run_capture(&["neonmines"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Usage: neonmines <command> [options]"));
}

#[test]
fn missing_history_file_reports_path() {
    let (code, _, err) = run_capture(&["neonmines", "stats", "--input", "no/such/rounds.jsonl"]);
    assert_eq!(code, 2);
    assert!(err.contains("Error: "));
    assert!(err.contains("no/such/rounds.jsonl"));
}
