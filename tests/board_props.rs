use battleship_targeting::config::DEFAULT_FLEET;
use battleship_targeting::{Board, Coordinate, Outcome, ShotResult};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const SIZE: usize = 10;

fn random_board(seed: u64) -> (Board, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(SIZE);
    board.place_fleet(&mut rng, &DEFAULT_FLEET).unwrap();
    (board, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn all_sunk_iff_every_ship_cell_fired(seed in any::<u64>()) {
        let (mut board, mut rng) = random_board(seed);
        let guesses = rng.random_range(0..SIZE * SIZE);
        for _ in 0..guesses {
            let c = Coordinate::new(rng.random_range(0..SIZE), rng.random_range(0..SIZE));
            let _ = board.receive_attack(c);
        }
        let every_cell_fired = board
            .ships()
            .iter()
            .all(|s| s.cells().all(|c| board.fired().is_set(c)));
        prop_assert_eq!(board.all_sunk(), every_cell_fired);
    }

    #[test]
    fn repeated_shot_changes_nothing(seed in any::<u64>(), row in 0..SIZE, col in 0..SIZE) {
        let (mut board, _) = random_board(seed);
        let c = Coordinate::new(row, col);
        let first = board.register_shot(c).unwrap();
        prop_assert_ne!(first, ShotResult::AlreadyFired);
        let fired_after = board.fired().clone();
        let hits_after: usize = board.ships().iter().map(|s| s.hit_count()).sum();

        prop_assert_eq!(board.register_shot(c).unwrap(), ShotResult::AlreadyFired);
        prop_assert_eq!(board.receive_attack(c), Outcome::Miss);
        prop_assert_eq!(board.fired(), &fired_after);
        let hits_now: usize = board.ships().iter().map(|s| s.hit_count()).sum();
        prop_assert_eq!(hits_now, hits_after);
    }

    #[test]
    fn fleet_never_touches(seed in any::<u64>()) {
        let (board, _) = random_board(seed);
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                prop_assert!(!a.overlaps(b));
                prop_assert!(!a.touches(b));
            }
        }
    }
}
