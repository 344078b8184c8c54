use std::collections::HashSet;

use battleship_targeting::config::DEFAULT_FLEET;
use battleship_targeting::selfplay::{play_seeded, run_self_play, self_play_stats};
use battleship_targeting::{
    play_match, Attacker, Board, Combatant, ConfigError, EngineConfig, GameStatus,
    HeuristicKind, MatchError, Outcome, Player, Side, Uniform,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn small_config(kind: HeuristicKind) -> EngineConfig {
    EngineConfig {
        heuristic: kind,
        samples: 30,
        grid_size: 6,
        fleet: vec![3, 2, 2],
    }
}

#[test]
fn test_every_heuristic_finishes_a_match() {
    for (i, kind) in HeuristicKind::ALL.into_iter().enumerate() {
        let seed = 100 + i as u64 * 10;
        let mut a = Combatant::automated(&small_config(kind), seed).unwrap();
        let mut b = Combatant::automated(&small_config(HeuristicKind::Uniform), seed + 2).unwrap();
        let result = play_match(&mut a, &mut b).unwrap();

        assert!(result.winner_moves <= 36, "{:?}: {:?}", kind, result);
        match result.winner {
            Side::First => {
                assert_eq!(result.total_moves, 2 * result.winner_moves - 1);
                assert_eq!(a.status(&b), GameStatus::Won);
                assert_eq!(b.status(&a), GameStatus::Lost);
            }
            Side::Second => {
                assert_eq!(result.total_moves, 2 * result.winner_moves);
                assert_eq!(a.status(&b), GameStatus::Lost);
            }
        }
        assert!(!a.is_engaged());
        assert!(!b.is_engaged());
    }
}

#[test]
fn test_attackers_never_repeat_a_cell() {
    for kind in HeuristicKind::ALL {
        let config = small_config(kind);
        let mut rng = SmallRng::seed_from_u64(31);
        let mut board = Board::new(config.grid_size);
        board.place_fleet(&mut rng, &config.fleet).unwrap();
        let mut attacker = Attacker::from_seed(&config, 32);

        let mut seen = HashSet::new();
        loop {
            let cell = attacker.choose_attack().expect("ran out of cells before winning");
            assert!(seen.insert(cell), "{:?} fired at {} twice", kind, cell);
            let outcome = board.receive_attack(cell);
            attacker.on_attack_outcome(cell, outcome);
            if outcome == Outcome::GameOver {
                break;
            }
        }
        assert!(board.all_sunk());
        assert!(attacker.remaining().is_empty());
    }
}

#[test]
fn test_smart_sinks_every_ship_it_finds() {
    let config = EngineConfig::with_heuristic("smart");
    let mut rng = SmallRng::seed_from_u64(77);
    let mut board = Board::new(config.grid_size);
    board.place_fleet(&mut rng, &config.fleet).unwrap();
    let mut attacker = Attacker::from_seed(&config, 78);

    let mut sunk = 0;
    loop {
        let cell = attacker.choose_attack().unwrap();
        let outcome = board.receive_attack(cell);
        attacker.on_attack_outcome(cell, outcome);
        match outcome {
            Outcome::Sunk => {
                sunk += 1;
                assert_eq!(attacker.remaining().len(), DEFAULT_FLEET.len() - sunk);
            }
            Outcome::GameOver => break,
            _ => {}
        }
    }
    assert_eq!(sunk, DEFAULT_FLEET.len() - 1);
    assert!(board.fired().count_ones() <= 100);
}

#[test]
fn test_engaged_combatant_is_rejected() {
    let config = small_config(HeuristicKind::Markov);
    let mut a = Combatant::automated(&config, 1).unwrap();
    let mut b = Combatant::automated(&config, 3).unwrap();

    a.engage().unwrap();
    assert_eq!(a.engage().unwrap_err(), MatchError::AlreadyEngaged);
    assert_eq!(play_match(&mut a, &mut b).unwrap_err(), MatchError::AlreadyEngaged);
    assert!(!b.is_engaged());

    a.release();
    assert!(play_match(&mut a, &mut b).is_ok());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = small_config(HeuristicKind::Uniform);
    config.grid_size = 1;
    assert!(matches!(
        Combatant::automated(&config, 0),
        Err(MatchError::Config(ConfigError::GridTooSmall { size: 1 }))
    ));
}

#[test]
fn test_exhausted_side_is_reported() {
    // Neither board has ships, so no shot can ever end the game.
    let attacker = |seed| {
        let rng = SmallRng::seed_from_u64(seed);
        Box::new(Attacker::with_parts(2, &[1], Box::new(Uniform), false, rng)) as Box<dyn Player>
    };
    let mut a = Combatant::new(attacker(1), Board::new(2));
    let mut b = Combatant::new(attacker(2), Board::new(2));
    assert_eq!(
        play_match(&mut a, &mut b).unwrap_err(),
        MatchError::Exhausted { side: Side::First }
    );
    assert_eq!(b.board().fired().count_ones(), 4);
    assert!(!a.is_engaged());
}

#[test]
fn test_seeded_matches_are_reproducible() {
    let first = small_config(HeuristicKind::Smart);
    let second = small_config(HeuristicKind::MonteCarlo);
    let r1 = play_seeded(&first, &second, 2024).unwrap();
    let r2 = play_seeded(&first, &second, 2024).unwrap();
    assert_eq!(r1, r2);
}

#[test]
fn test_self_play_batch() {
    let config = small_config(HeuristicKind::Smart);
    let results = run_self_play(&config, 8, Some(5)).unwrap();
    assert_eq!(results.len(), 8);
    assert_eq!(results, run_self_play(&config, 8, Some(5)).unwrap());

    let stats = self_play_stats(&config, 8, Some(5)).unwrap().unwrap();
    assert_eq!(stats.trials, 8);
    assert!(stats.min as f64 <= stats.mean && stats.mean <= stats.max as f64);
    assert!(stats.std_error <= stats.std_dev);

    assert!(self_play_stats(&config, 0, Some(5)).unwrap().is_none());
}
