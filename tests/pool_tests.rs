use broadside::{
    CellSet, DiagonalShotPool, Move, PoolError, ShotPattern, Slope, DIAGONAL_POOLS, GRID_CELLS,
    GRID_WIDTH, MAX_DIAGONAL_SPACING, MIN_DIAGONAL_SPACING,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_diagonal_masks() {
    let rising = DiagonalShotPool::with_slope(Slope::Rising);
    assert_eq!(rising.available().len(), GRID_CELLS);
    assert_eq!(rising.diagonal(2).unwrap().len(), 50);
    assert_eq!(rising.diagonal(5).unwrap().len(), 20);
    assert!(rising.diagonal(3).unwrap().contains(12));
    assert!(rising.diagonal(3).unwrap().contains(30));
    assert!(!rising.diagonal(3).unwrap().contains(11));

    let falling = DiagonalShotPool::with_slope(Slope::Falling);
    assert!(falling.diagonal(3).unwrap().contains(0));
    assert!(falling.diagonal(3).unwrap().contains(33));
    assert!(falling.diagonal(3).unwrap().contains(3));
    assert!(!falling.diagonal(3).unwrap().contains(2));

    assert_eq!(rising.diagonal(1), None);
    assert_eq!(rising.diagonal(6), None);
}

#[test]
fn test_consume_clears_every_pool() {
    let mut pool = DiagonalShotPool::with_slope(Slope::Rising);
    pool.consume(44, ShotPattern::Bombardment).unwrap();
    for cell in [44, 45, 43, 54, 34] {
        assert!(!pool.is_available(cell));
        for spacing in MIN_DIAGONAL_SPACING..=MAX_DIAGONAL_SPACING {
            assert!(!pool.diagonal(spacing).unwrap().contains(cell));
        }
    }
    assert_eq!(pool.available().len(), GRID_CELLS - 5);
}

#[test]
fn test_consume_rejects_without_mutating() {
    let mut pool = DiagonalShotPool::with_slope(Slope::Falling);
    pool.consume(45, ShotPattern::Single).unwrap();
    let before = pool.clone();

    assert_eq!(
        pool.consume(44, ShotPattern::Bombardment),
        Err(PoolError::NotAvailable { cell: 45 })
    );
    assert_eq!(
        pool.consume(9, ShotPattern::AirstrikeDownRight),
        Err(PoolError::PatternOutOfBounds {
            anchor: 9,
            pattern: ShotPattern::AirstrikeDownRight
        })
    );
    assert_eq!(
        pool.consume(45, ShotPattern::Single),
        Err(PoolError::NotAvailable { cell: 45 })
    );
    assert_eq!(pool, before);
}

#[test]
fn test_select_does_not_consume() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut pool = DiagonalShotPool::new(&mut rng);
    let before = pool.clone();
    let mv = pool.select(&mut rng, ShotPattern::Single, 4).unwrap();
    assert_eq!(pool, before);
    assert!(pool.diagonal(4).unwrap().contains(mv.cell));

    let picked = pool.pick(&mut rng, ShotPattern::Single, 4).unwrap().unwrap();
    assert!(!pool.is_available(picked.cell));
    assert_eq!(pool.available().len(), GRID_CELLS - 1);
}

#[test]
fn test_single_falls_back_to_narrower_spacing() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut pool = DiagonalShotPool::with_slope(Slope::Rising);
    for cell in pool.diagonal(5).unwrap().iter() {
        pool.consume(cell, ShotPattern::Single).unwrap();
    }
    assert!(pool.diagonal(5).unwrap().is_empty());
    for _ in 0..20 {
        let mv = pool.select(&mut rng, ShotPattern::Single, 5).unwrap();
        assert!(pool.diagonal(4).unwrap().contains(mv.cell));
    }
}

#[test]
fn test_multi_cell_pattern_fits() {
    let mut rng = SmallRng::seed_from_u64(11);
    let pool = DiagonalShotPool::new(&mut rng);
    for pattern in ShotPattern::ALL {
        for _ in 0..20 {
            let mv = pool.select(&mut rng, pattern, 3).unwrap();
            let cells = pool.open_footprint(mv.cell, mv.pattern).unwrap();
            assert!(!cells.is_empty());
        }
    }
}

#[test]
fn test_pattern_downgraded_when_nothing_fits() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut pool = DiagonalShotPool::with_slope(Slope::Rising);
    // leave only the border, where a bombardment never fits
    for cell in 0..GRID_CELLS {
        let (row, col) = (cell / GRID_WIDTH, cell % GRID_WIDTH);
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            pool.consume(cell, ShotPattern::Single).unwrap();
        }
    }
    let mv = pool.select(&mut rng, ShotPattern::Bombardment, 2).unwrap();
    assert_eq!(mv.pattern, ShotPattern::Single);
    assert!(pool.is_available(mv.cell));
}

#[test]
fn test_exhausted_pool() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut pool = DiagonalShotPool::new(&mut rng);
    let mut fired = CellSet::new();
    while let Some(Move { cell, .. }) = pool.pick(&mut rng, ShotPattern::Single, 2).unwrap() {
        assert!(fired.insert(cell));
    }
    assert_eq!(fired, CellSet::full());
    assert!(pool.is_exhausted());
    assert_eq!(pool.select(&mut rng, ShotPattern::Bombardment, 5), None);
    assert_eq!(pool.pick(&mut rng, ShotPattern::Single, 2), Ok(None));
}

#[test]
fn test_pick_consumes_whole_footprint() {
    let mut rng = SmallRng::seed_from_u64(12);
    let mut pool = DiagonalShotPool::new(&mut rng);
    let mv = pool
        .pick(&mut rng, ShotPattern::Bombardment, 2)
        .unwrap()
        .unwrap();
    for cell in mv.footprint().unwrap() {
        assert!(!pool.is_available(cell));
        assert_eq!(
            pool.consume(cell, ShotPattern::Single),
            Err(PoolError::NotAvailable { cell })
        );
    }
    assert_eq!(pool.available().len(), GRID_CELLS - mv.footprint().unwrap().len());
}

#[test]
fn test_from_parts_checks_subsets() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut pool = DiagonalShotPool::new(&mut rng);
    pool.consume(0, ShotPattern::Single).unwrap();

    let rebuilt = DiagonalShotPool::from_parts(pool.available(), pool.diagonals()).unwrap();
    assert_eq!(rebuilt.available(), pool.available());
    assert_eq!(rebuilt.diagonals(), pool.diagonals());

    let mut diagonals = pool.diagonals();
    diagonals[1].insert(0);
    assert_eq!(
        DiagonalShotPool::from_parts(pool.available(), diagonals).unwrap_err(),
        PoolError::InconsistentSnapshot { spacing: 3 }
    );
    assert_eq!(diagonals.len(), DIAGONAL_POOLS);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn consumed_cells_leave_every_pool(
        seed in any::<u64>(),
        shots in prop::collection::vec((0..GRID_CELLS, 0..4usize), 1..60),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pool = DiagonalShotPool::new(&mut rng);
        let mut fired = CellSet::new();
        for (anchor, p) in shots {
            let pattern = ShotPattern::ALL[p];
            if pool.consume(anchor, pattern).is_ok() {
                for cell in pattern.footprint(anchor).unwrap() {
                    prop_assert!(fired.insert(cell));
                }
            }
            prop_assert!((pool.available() & fired).is_empty());
            for diagonal in pool.diagonals() {
                prop_assert!(diagonal.is_subset(&pool.available()));
            }
        }
        prop_assert_eq!(pool.available().len() + fired.len(), GRID_CELLS);
    }
}
