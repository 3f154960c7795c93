use anyhow::Context;
use broadside::{init_logging, Difficulty, EngineConfig, GridBoard, TargetingEngine, TurnReport};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Play the targeting engine against randomly placed fleets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    difficulty: Difficulty,
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, help = "Fix RNG seed for reproducible runs (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Forbid ships from touching orthogonally.
    #[arg(long)]
    no_touch: bool,
    /// Allow airstrikes once enough hits have landed.
    #[arg(long)]
    airstrike: bool,
    /// Allow bombardments once enough hits have landed.
    #[arg(long)]
    bombardment: bool,
}

#[derive(Serialize, Debug)]
struct Summary {
    difficulty: Difficulty,
    seed: u64,
    games: usize,
    mean_moves: f64,
    min_moves: usize,
    max_moves: usize,
    moves: Vec<usize>,
}

/// Moves the engine needs to sink every ship on one board.
fn play_game(config: EngineConfig, rng: &mut SmallRng) -> anyhow::Result<usize> {
    let mut board = GridBoard::random(rng, config.ships_can_touch)?;
    let mut engine = TargetingEngine::new(config, rng);
    let mut last: Option<TurnReport> = None;
    let mut moves = 0;
    loop {
        let remaining = board.remaining_ship_sizes();
        let mv = engine
            .choose_next_move(rng, board.grid(), &remaining, last.as_ref())
            .with_context(|| format!("move {} of game", moves + 1))?;
        let report = board.resolve_shot(mv.cell, mv.pattern)?;
        moves += 1;
        if report.is_game_over {
            return Ok(moves);
        }
        last = Some(report);
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = EngineConfig::new(args.difficulty)
        .ships_can_touch(!args.no_touch)
        .with_airstrike(args.airstrike)
        .with_bombardment(args.bombardment);

    let moves = (0..args.games)
        .map(|_| play_game(config, &mut rng))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let summary = Summary {
        difficulty: args.difficulty,
        seed,
        games: moves.len(),
        mean_moves: if moves.is_empty() {
            0.0
        } else {
            moves.iter().sum::<usize>() as f64 / moves.len() as f64
        },
        min_moves: moves.iter().copied().min().unwrap_or(0),
        max_moves: moves.iter().copied().max().unwrap_or(0),
        moves,
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
