use neonmines_engine::engine::{Engine, RoundResult};
use neonmines_engine::stats::SessionStats;

#[test]
fn stats_from_live_rounds_match_wallet() {
    let mut eng = Engine::new(Some(8), 1000.0);
    let mut stats = SessionStats::new();
    for n in 0..30 {
        eng.start(10.0, 3).unwrap();
        let hidden = eng.grid().hidden_indices().next().unwrap();
        eng.reveal(hidden).unwrap();
        if eng.is_playing() {
            eng.cash_out().unwrap();
        }
        let rec = eng.record(format!("20260101-{:06}", n + 1)).unwrap();
        stats.add(&rec);
    }
    assert_eq!(stats.rounds, 30);
    assert_eq!(stats.wins + stats.losses, 30);
    assert_eq!(stats.wagered, 300.0);
    assert!((1000.0 + stats.net() - eng.balance()).abs() < 1e-9);
}

#[test]
fn empty_stats_have_no_rtp() {
    let stats = SessionStats::new();
    assert_eq!(stats.rtp(), None);
    assert_eq!(stats.win_rate(), None);
    let json = stats.to_json();
    assert!(json["rtp"].is_null());
    assert_eq!(json["rounds"], 0);
}

#[test]
fn collects_from_record_iterator() {
    let mut eng = Engine::new(None, 100.0);
    let mut recs = Vec::new();
    eng.start_with_layout(10.0, &[0, 1, 2]).unwrap();
    eng.reveal(3).unwrap();
    eng.cash_out().unwrap();
    recs.push(eng.record("a").unwrap());
    eng.start_with_layout(10.0, &[0, 1, 2]).unwrap();
    eng.reveal(0).unwrap();
    recs.push(eng.record("b").unwrap());

    let stats: SessionStats = recs.iter().collect();
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(recs[1].result, RoundResult::Loss);
    assert!((stats.best_multiplier - 1.125).abs() < 1e-9);
    assert!((stats.net() + 8.75).abs() < 1e-9);
}
