use broadside::{
    BoardState, CellSet, FleetPlacer, GridBoard, Orientation, ShotPattern, FLEET, GRID_CELLS,
    GRID_WIDTH,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn neighbours(cell: usize) -> Vec<usize> {
    let (row, col) = (cell / GRID_WIDTH, cell % GRID_WIDTH);
    let mut out = Vec::new();
    if col > 0 {
        out.push(cell - 1);
    }
    if col + 1 < GRID_WIDTH {
        out.push(cell + 1);
    }
    if row > 0 {
        out.push(cell - GRID_WIDTH);
    }
    if row + 1 < GRID_WIDTH {
        out.push(cell + GRID_WIDTH);
    }
    out
}

fn fired_board(seed: u64) -> GridBoard {
    let mut rng = SmallRng::seed_from_u64(seed);
    let ships_can_touch = rng.random_bool(0.5);
    let mut board = GridBoard::random(&mut rng, ships_can_touch).unwrap();
    for _ in 0..rng.random_range(0..GRID_CELLS) {
        let _ = board.resolve_shot(rng.random_range(0..GRID_CELLS), ShotPattern::Single);
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_in_bounds_and_disjoint(seed in any::<u64>(), ships_can_touch in any::<bool>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = FleetPlacer::new(ships_can_touch).generate(&mut rng);
        prop_assert!(layout.is_complete());

        let mut seen = CellSet::new();
        for (kind, start, orientation) in layout.iter() {
            let cells: Vec<usize> = (0..kind.size())
                .map(|i| start + i * orientation.step())
                .collect();
            for &cell in &cells {
                prop_assert!(cell < GRID_CELLS);
                match orientation {
                    Orientation::Horizontal => {
                        prop_assert_eq!(cell / GRID_WIDTH, start / GRID_WIDTH);
                    }
                    Orientation::Vertical => {
                        prop_assert_eq!(cell % GRID_WIDTH, start % GRID_WIDTH);
                    }
                }
                prop_assert!(seen.insert(cell), "cell {} used twice", cell);
            }
        }
        prop_assert_eq!(seen.len(), FLEET.iter().map(|k| k.size()).sum::<usize>());
        prop_assert!(GridBoard::from_layout(&layout, ships_can_touch).is_ok());
    }

    #[test]
    fn no_touch_placement_keeps_ships_apart(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = GridBoard::random(&mut rng, false).unwrap();
        for (i, ship) in board.ships().iter().enumerate() {
            for other in board.ships().iter().skip(i + 1) {
                for cell in ship.cells() {
                    for next in neighbours(cell) {
                        prop_assert!(!other.occupies(next), "{:?} touches {:?}", ship, other);
                    }
                }
            }
        }
    }

    #[test]
    fn sinking_reported_exactly_once(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = GridBoard::random(&mut rng, true).unwrap();
        let mut order: Vec<usize> = (0..GRID_CELLS).collect();
        for i in (1..order.len()).rev() {
            order.swap(i, rng.random_range(0..=i));
        }
        let mut sunk = Vec::new();
        for cell in order {
            let report = board.resolve_shot(cell, ShotPattern::Single).unwrap();
            for ship in &report.ships_sunk {
                let last_segment = ship.cells().any(|c| c == cell);
                prop_assert!(last_segment);
                prop_assert!(!sunk.contains(&ship.kind));
                sunk.push(ship.kind);
            }
            if report.is_game_over {
                break;
            }
        }
        prop_assert_eq!(sunk.len(), FLEET.len());
    }

    #[test]
    fn board_state_roundtrip(seed in any::<u64>()) {
        let board = fired_board(seed);
        let state = BoardState::from(&board);
        let restored = GridBoard::try_from(state.clone()).unwrap();
        prop_assert_eq!(BoardState::from(&restored), state);
        prop_assert_eq!(restored, board);
    }
}
