use broadside::{
    CellSet, DiagonalShotPool, Difficulty, EngineConfig, EngineError, EngineSnapshot, GridBoard,
    PoolError, Slope, TargetingEngine, TurnReport, GRID_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// An engine part-way through a game, plus the board it is firing at.
fn mid_game(seed: u64, moves: usize) -> (TargetingEngine, GridBoard, Option<TurnReport>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = EngineConfig::new(Difficulty::Hard).with_airstrike(true);
    let mut board = GridBoard::random(&mut rng, true).unwrap();
    let mut engine = TargetingEngine::new(config, &mut rng);
    let mut last = None;
    for _ in 0..moves {
        let remaining = board.remaining_ship_sizes();
        let mv = engine
            .choose_next_move(&mut rng, board.grid(), &remaining, last.as_ref())
            .unwrap();
        last = Some(board.resolve_shot(mv.cell, mv.pattern).unwrap());
    }
    (engine, board, last)
}

#[test]
fn test_snapshot_roundtrip_through_json() {
    let (engine, _, _) = mid_game(17, 12);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.history.len(), 12);
    assert_eq!(snapshot.heatmap.len(), GRID_CELLS);

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: EngineSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let restored = TargetingEngine::restore(decoded).unwrap();
    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(restored.heatmap(), engine.heatmap());
    assert_eq!(restored.history(), engine.history());
}

#[test]
fn test_restored_engine_plays_identically() {
    let (mut original, board, last) = mid_game(23, 10);
    let mut restored = TargetingEngine::restore(original.snapshot()).unwrap();
    let remaining = board.remaining_ship_sizes();

    let mut rng_a = SmallRng::seed_from_u64(1);
    let mut rng_b = SmallRng::seed_from_u64(1);
    let a = original
        .choose_next_move(&mut rng_a, board.grid(), &remaining, last.as_ref())
        .unwrap();
    let b = restored
        .choose_next_move(&mut rng_b, board.grid(), &remaining, last.as_ref())
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(original.snapshot(), restored.snapshot());
}

#[test]
fn test_restore_rejects_bad_heat_map() {
    let (engine, _, _) = mid_game(3, 4);
    let mut snapshot = engine.snapshot();
    snapshot.heatmap.pop();
    assert_eq!(
        TargetingEngine::restore(snapshot).unwrap_err(),
        EngineError::HeatMapLength { len: GRID_CELLS - 1 }
    );
}

#[test]
fn test_restore_rejects_desynced_pools() {
    let (engine, _, _) = mid_game(3, 4);
    let mut snapshot = engine.snapshot();
    let fired = engine.history()[0].cell;
    snapshot.diagonals[0].insert(fired);
    assert_eq!(
        TargetingEngine::restore(snapshot).unwrap_err(),
        EngineError::Pool(PoolError::InconsistentSnapshot { spacing: 2 })
    );
}

#[test]
fn test_fresh_snapshot() {
    let config = EngineConfig::default();
    let engine = TargetingEngine::with_pool(config, DiagonalShotPool::with_slope(Slope::Falling));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.config, config);
    assert_eq!(snapshot.available, CellSet::full());
    assert!(snapshot.heatmap.iter().all(|&s| s == 100));
    assert_eq!(snapshot.airstrike_hits, 0);
    assert!(snapshot.history.is_empty());
}
