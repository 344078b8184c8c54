use battleship_targeting::{BitBoard, BitBoardError, Coordinate};

#[test]
fn test_get_set_toggle() {
    let mut bb = BitBoard::<u16>::new(4);
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());

    bb.toggle(1, 1).unwrap();
    assert!(!bb.get(1, 1).unwrap());

    bb.set(2, 3).unwrap();
    assert!(bb.get(2, 3).unwrap());
    bb.clear(2, 3).unwrap();
    assert!(bb.is_empty());
}

#[test]
fn test_out_of_bounds_is_an_error() {
    let mut bb = BitBoard::<u64>::new(4);
    assert_eq!(
        bb.set(4, 0).unwrap_err(),
        BitBoardError::IndexOutOfBounds { row: 4, col: 0 }
    );
    assert!(bb.get(0, 4).is_err());
    // Coordinate reads treat off-board cells as unset.
    assert!(!bb.is_set(Coordinate::new(9, 9)));
}

#[test]
fn test_from_iter_and_iter() {
    let bb = BitBoard::<u16>::from_iter(4, [(0, 1), (3, 3)]).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![Coordinate::new(0, 1), Coordinate::new(3, 3)]);
    assert_eq!(bb.iter_unset_bits().count(), 14);
}

#[test]
fn test_multi_word_boards() {
    // 81 cells span two u64 words and six u16 words.
    let mut bb = BitBoard::<u64>::new(9);
    bb.set(8, 8).unwrap();
    bb.set(0, 0).unwrap();
    assert_eq!(bb.count_ones(), 2);
    assert_eq!(bb.cell_count(), 81);

    let small = BitBoard::<u16>::new(9);
    let full = !&small;
    assert_eq!(full.count_ones(), 81);
    assert!(full.is_full());
}

#[test]
fn test_bitwise_ops() {
    let a = BitBoard::<u64>::from_iter(5, [(0, 0), (1, 1), (2, 2)]).unwrap();
    let b = BitBoard::<u64>::from_iter(5, [(1, 1), (4, 4)]).unwrap();

    let and = &a & &b;
    assert_eq!(and.iter_set_bits().collect::<Vec<_>>(), vec![Coordinate::new(1, 1)]);

    let or = &a | &b;
    assert_eq!(or.count_ones(), 4);

    assert_eq!(a.try_and(&b).unwrap(), and);
    assert_eq!(a.try_or(&b).unwrap(), or);
}

#[test]
fn test_size_mismatch() {
    let a = BitBoard::<u64>::new(4);
    let b = BitBoard::<u64>::new(5);
    assert_eq!(
        a.try_and(&b).unwrap_err(),
        BitBoardError::SizeMismatch { left: 4, right: 5 }
    );
    assert!(a.try_or(&b).is_err());
}

#[test]
fn test_clear_all() {
    let mut bb = BitBoard::<u8>::from_iter(3, [(0, 0), (2, 2), (1, 2)]).unwrap();
    assert_eq!(bb.count_ones(), 3);
    bb.clear_all();
    assert!(bb.is_empty());
}
