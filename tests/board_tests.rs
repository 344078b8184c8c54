use battleship_targeting::config::DEFAULT_FLEET;
use battleship_targeting::{Board, BoardError, Coordinate, Orientation, Outcome, Ship, ShotResult};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn ship(row: usize, col: usize, len: usize, orient: Orientation) -> Ship {
    Ship::new(Coordinate::new(row, col), len, orient).unwrap()
}

#[test]
fn test_manual_place_rules() {
    let mut board = Board::new(5);
    assert_eq!(
        board.place(ship(0, 3, 3, Orientation::Horizontal)).unwrap_err(),
        BoardError::ShipOutOfBounds
    );

    board.place(ship(0, 0, 3, Orientation::Horizontal)).unwrap();
    assert_eq!(
        board.place(ship(0, 2, 2, Orientation::Vertical)).unwrap_err(),
        BoardError::ShipOverlaps
    );
    assert_eq!(
        board.place(ship(1, 0, 2, Orientation::Horizontal)).unwrap_err(),
        BoardError::ShipTouches
    );
    // Diagonal to the first ship's end is fine.
    board.place(ship(1, 3, 2, Orientation::Vertical)).unwrap();
    board.place(ship(3, 0, 2, Orientation::Horizontal)).unwrap();
    assert_eq!(board.ships().len(), 3);
}

#[test]
fn test_register_shot_and_repeat() {
    let mut board = Board::new(5);
    board.place(ship(2, 2, 2, Orientation::Horizontal)).unwrap();

    assert_eq!(board.register_shot(Coordinate::new(2, 2)).unwrap(), ShotResult::Hit);
    assert_eq!(
        board.register_shot(Coordinate::new(2, 2)).unwrap(),
        ShotResult::AlreadyFired
    );
    assert_eq!(board.register_shot(Coordinate::new(0, 0)).unwrap(), ShotResult::Miss);
    assert_eq!(board.fired().count_ones(), 2);
    assert!(board.register_shot(Coordinate::new(5, 0)).is_err());
}

#[test]
fn test_receive_attack_outcomes() {
    let mut board = Board::new(5);
    board.place(ship(0, 0, 2, Orientation::Horizontal)).unwrap();
    board.place(ship(2, 0, 2, Orientation::Horizontal)).unwrap();

    assert_eq!(board.receive_attack(Coordinate::new(0, 0)), Outcome::Hit);
    assert_eq!(board.receive_attack(Coordinate::new(0, 0)), Outcome::Miss);
    assert_eq!(board.receive_attack(Coordinate::new(4, 4)), Outcome::Miss);
    assert_eq!(board.receive_attack(Coordinate::new(0, 1)), Outcome::Sunk);
    assert!(board.is_sunk_at(Coordinate::new(0, 0)));
    assert!(!board.all_sunk());

    assert_eq!(board.receive_attack(Coordinate::new(2, 0)), Outcome::Hit);
    assert_eq!(board.receive_attack(Coordinate::new(9, 9)), Outcome::Miss);
    assert_eq!(board.receive_attack(Coordinate::new(2, 1)), Outcome::GameOver);
    assert!(board.all_sunk());
}

#[test]
fn test_empty_board_is_sunk() {
    let board = Board::new(4);
    assert!(board.all_sunk());
    assert!(board.is_water(Coordinate::new(1, 1)));
}

#[test]
fn test_random_placement_rejects_bad_lengths() {
    let board = Board::new(4);
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(
        board.random_placement(&mut rng, 0).unwrap_err(),
        BoardError::EmptyShip
    );
    assert_eq!(
        board.random_placement(&mut rng, 5).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    let s = board.random_placement(&mut rng, 4).unwrap();
    assert!(s.fits(4));
}

#[test]
fn test_place_fleet_no_overlap_no_touch() {
    for seed in 0..20 {
        let mut board = Board::new(10);
        let mut rng = SmallRng::seed_from_u64(seed);
        board.place_fleet(&mut rng, &DEFAULT_FLEET).unwrap();

        let ships = board.ships();
        assert_eq!(ships.len(), DEFAULT_FLEET.len());
        let lengths: Vec<usize> = ships.iter().map(|s| s.length()).collect();
        assert_eq!(lengths, DEFAULT_FLEET.to_vec());
        for (i, a) in ships.iter().enumerate() {
            assert!(a.fits(10));
            for b in &ships[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                assert!(!a.touches(b), "{:?} touches {:?}", a, b);
            }
        }
        let occupied: usize = (0..10)
            .flat_map(|r| (0..10).map(move |c| Coordinate::new(r, c)))
            .filter(|&c| !board.is_water(c))
            .count();
        assert_eq!(occupied, DEFAULT_FLEET.iter().sum::<usize>());
    }
}

#[test]
fn test_place_fleet_impossible() {
    // Three length-3 ships cannot avoid touching on a 3x3 grid.
    let mut board = Board::new(3);
    let mut rng = SmallRng::seed_from_u64(7);
    let err = board.place_fleet(&mut rng, &[3, 3, 3]).unwrap_err();
    assert_eq!(err, BoardError::UnableToPlaceShip { length: 3 });
    assert!(board.ships().is_empty());
}
