use neonmines_engine::engine::{Engine, RoundResult, RoundState};
use neonmines_engine::errors::GameError;
use neonmines_engine::rules::BetAdjustment;

fn first_safe(mines: &[usize]) -> usize {
    (0..25).find(|i| !mines.contains(i)).unwrap()
}

#[test]
fn start_debits_bet_and_hides_every_cell() {
    let mut eng = Engine::new(Some(3), 1000.0);
    let round = eng.start(10.0, 5).expect("start ok");
    assert_eq!(round.state, RoundState::Playing);
    assert_eq!(round.balance, 990.0);
    assert_eq!(eng.grid().mine_count(), 5);
    assert_eq!(eng.grid().revealed_count(), 0);
    assert_eq!(eng.safe_revealed(), 0);
}

#[test]
fn start_with_insufficient_funds_changes_nothing() {
    let mut eng = Engine::new(Some(3), 5.0);
    let before = eng.round();
    let err = eng.start(10.0, 3).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientFunds {
            bet: 10.0,
            balance: 5.0
        }
    );
    assert_eq!(eng.round(), before);
}

#[test]
fn start_rejects_bad_configuration() {
    let mut eng = Engine::new(Some(3), 100.0);
    assert!(matches!(
        eng.start(0.0, 3),
        Err(GameError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        eng.start(-5.0, 3),
        Err(GameError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        eng.start(10.0, 1),
        Err(GameError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        eng.start(10.0, 25),
        Err(GameError::InvalidConfiguration { .. })
    ));
    assert_eq!(eng.balance(), 100.0);
    assert_eq!(eng.state(), RoundState::Idle);
}

#[test]
fn one_reveal_then_cash_out_pays_11_25() {
    let mines = [0, 1, 2];
    let mut eng = Engine::new(None, 1000.0);
    eng.start_with_layout(10.0, &mines).unwrap();
    let safe = first_safe(&mines);
    let out = eng.reveal(safe).unwrap();
    assert!(!out.hit_mine);
    assert!(!out.round_ended);
    assert!((out.multiplier - 1.125).abs() < 1e-9);
    assert!((eng.current_profit() - 1.25).abs() < 1e-9);
    assert!((eng.potential_payout() - 11.25).abs() < 1e-9);

    let paid = eng.cash_out().unwrap();
    assert!((paid.payout - 11.25).abs() < 1e-9);
    assert!((paid.balance - 1001.25).abs() < 1e-9);
    let round = eng.round();
    assert_eq!(round.state, RoundState::Ended);
    assert_eq!(round.last_result, Some(RoundResult::Win));
    assert!(eng.grid().all_revealed());
}

#[test]
fn hitting_a_mine_loses_and_reveals_board() {
    let mut eng = Engine::new(None, 100.0);
    eng.start_with_layout(10.0, &[7, 8, 9]).unwrap();
    eng.reveal(0).unwrap();
    let out = eng.reveal(8).unwrap();
    assert!(out.hit_mine);
    assert!(out.round_ended);
    assert_eq!(out.multiplier, 0.0);
    assert_eq!(out.payout, None);
    let round = eng.round();
    assert_eq!(round.last_result, Some(RoundResult::Loss));
    assert_eq!(round.payout, 0.0);
    assert_eq!(round.balance, 90.0);
    assert!(eng.grid().all_revealed());
}

#[test]
fn twenty_four_mines_first_reveal_settles_either_way() {
    for seed in 0..40 {
        let mut eng = Engine::new(Some(seed), 100.0);
        eng.start(10.0, 24).unwrap();
        let pick = (seed as usize) % 25;
        let out = eng.reveal(pick).unwrap();
        assert!(out.round_ended);
        if out.hit_mine {
            assert_eq!(eng.round().last_result, Some(RoundResult::Loss));
            assert_eq!(eng.balance(), 90.0);
        } else {
            assert!((out.multiplier - 24.75).abs() < 1e-9);
            assert!((out.payout.unwrap() - 247.5).abs() < 1e-9);
            assert!((eng.balance() - 337.5).abs() < 1e-9);
        }
    }
}

#[test]
fn clearing_the_board_auto_wins_at_full_multiplier() {
    let mines = [20, 21, 22, 23, 24];
    let mut eng = Engine::new(None, 100.0);
    eng.start_with_layout(2.0, &mines).unwrap();
    let expected = neonmines_engine::multiplier::default_multiplier(20, 5);
    for i in 0..20 {
        let out = eng.reveal(i).unwrap();
        assert_eq!(out.round_ended, i == 19);
    }
    let round = eng.round();
    assert_eq!(round.state, RoundState::Ended);
    assert_eq!(round.last_result, Some(RoundResult::Win));
    assert!((round.payout - 2.0 * expected).abs() < 1e-9);
}

#[test]
fn cash_out_before_reveal_is_rejected() {
    let mut eng = Engine::new(Some(1), 100.0);
    eng.start(10.0, 3).unwrap();
    assert_eq!(eng.cash_out().unwrap_err(), GameError::NothingToCashOut);
    assert_eq!(eng.balance(), 90.0);
    assert!(eng.is_playing());
}

#[test]
fn moves_outside_a_round_are_invalid() {
    let mut eng = Engine::new(Some(1), 100.0);
    assert!(matches!(eng.reveal(0), Err(GameError::InvalidMove { .. })));
    assert!(matches!(eng.cash_out(), Err(GameError::InvalidMove { .. })));
}

#[test]
fn repeated_or_off_board_reveal_is_invalid() {
    let mut eng = Engine::new(None, 100.0);
    eng.start_with_layout(10.0, &[10, 11]).unwrap();
    eng.reveal(0).unwrap();
    assert!(matches!(eng.reveal(0), Err(GameError::InvalidMove { .. })));
    assert!(matches!(eng.reveal(25), Err(GameError::InvalidMove { .. })));
    assert_eq!(eng.safe_revealed(), 1);
    assert_eq!(eng.reveals(), &[0]);
}

#[test]
fn configuration_locked_while_playing() {
    let mut eng = Engine::new(Some(1), 100.0);
    eng.start(10.0, 3).unwrap();
    assert!(matches!(
        eng.adjust_bet(BetAdjustment::Double),
        Err(GameError::InvalidMove { .. })
    ));
    assert!(matches!(eng.set_mine_count(5), Err(GameError::InvalidMove { .. })));
    assert!(matches!(eng.set_bet(20.0), Err(GameError::InvalidMove { .. })));
    assert_eq!(eng.bet_amount(), 10.0);
    assert_eq!(eng.mine_count(), 3);
}

#[test]
fn bet_controls_between_rounds() {
    let mut eng = Engine::new(Some(1), 100.0);
    assert_eq!(eng.adjust_bet(BetAdjustment::Halve), Ok(5.0));
    assert_eq!(eng.adjust_bet(BetAdjustment::Halve), Ok(2.0));
    assert_eq!(eng.adjust_bet(BetAdjustment::Halve), Ok(1.0));
    assert_eq!(eng.adjust_bet(BetAdjustment::Halve), Ok(1.0));
    assert_eq!(eng.adjust_bet(BetAdjustment::Double), Ok(2.0));
    assert_eq!(eng.set_bet(25.0), Ok(25.0));
    assert!(eng.set_bet(0.0).is_err());
    assert_eq!(eng.set_mine_count(10), Ok(10));
    assert!(eng.set_mine_count(1).is_err());
    assert!(eng.set_mine_count(25).is_err());
    assert_eq!(eng.mine_count(), 10);

    let round = eng.start_configured().unwrap();
    assert_eq!(round.bet_amount, 25.0);
    assert_eq!(round.mine_count, 10);
    assert_eq!(round.balance, 75.0);
}

#[test]
fn new_round_after_end_resets_round_state() {
    let mut eng = Engine::new(None, 100.0);
    eng.start_with_layout(10.0, &[0, 1]).unwrap();
    eng.reveal(0).unwrap();
    assert_eq!(eng.state(), RoundState::Ended);
    let round = eng.start_with_layout(10.0, &[5, 6]).unwrap();
    assert_eq!(round.state, RoundState::Playing);
    assert_eq!(round.last_result, None);
    assert_eq!(round.safe_revealed, 0);
    assert!(eng.reveals().is_empty());
    assert_eq!(eng.grid().revealed_count(), 0);
}

#[test]
fn record_captures_settled_round() {
    let mut eng = Engine::new(Some(11), 100.0);
    assert!(eng.record("x").is_none());
    eng.start_with_layout(10.0, &[3, 1, 2]).unwrap();
    eng.reveal(0).unwrap();
    assert!(eng.record("x").is_none());
    eng.cash_out().unwrap();
    let rec = eng.record("20260101-000001").expect("settled");
    assert_eq!(rec.mines, vec![1, 2, 3]);
    assert_eq!(rec.reveals, vec![0]);
    assert_eq!(rec.result, RoundResult::Win);
    assert_eq!(rec.seed, Some(11));
    assert!((rec.payout - 11.25).abs() < 1e-9);
    assert!((rec.balance_after - 101.25).abs() < 1e-9);
}

#[test]
fn same_seed_replays_identical_session() {
    let play = |seed| {
        let mut eng = Engine::new(Some(seed), 1000.0);
        let mut log = Vec::new();
        for _ in 0..20 {
            eng.start(10.0, 5).unwrap();
            while eng.is_playing() && eng.safe_revealed() < 3 {
                let next = eng.grid().hidden_indices().next().unwrap();
                eng.reveal(next).unwrap();
            }
            if eng.is_playing() {
                eng.cash_out().unwrap();
            }
            log.push(eng.round());
        }
        log
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn configuring_next_round_leaves_settled_round_intact() {
    let mut eng = Engine::new(Some(5), 100.0);
    eng.start_with_layout(10.0, &[0, 1]).unwrap();
    for index in 2..25 {
        eng.reveal(index).unwrap();
    }
    assert_eq!(eng.round().last_result, Some(RoundResult::Win));
    let before = eng.record("20260101-000001").unwrap();
    let multiplier = eng.current_multiplier();
    let profit = eng.current_profit();

    eng.set_mine_count(24).unwrap();
    eng.adjust_bet(BetAdjustment::Double).unwrap();

    let after = eng.record("20260101-000001").unwrap();
    assert_eq!(before, after);
    assert_eq!(after.bet, 10.0);
    assert_eq!(after.mine_count, 2);
    assert_eq!(eng.current_multiplier(), multiplier);
    assert_eq!(eng.current_profit(), profit);
    assert!(eng.current_multiplier().is_finite());
    assert!((eng.potential_payout() - after.payout).abs() < 1e-9);

    // the new configuration applies to the next round
    assert_eq!(eng.round().bet_amount, 20.0);
    assert_eq!(eng.round().mine_count, 24);
    eng.start_configured().unwrap();
    assert_eq!(eng.grid().mine_count(), 24);
}
