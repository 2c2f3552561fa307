use chess_core::board::Board;
use chess_core::moves::Move;
use chess_core::piece::Color;
use chess_core::square::Cell;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_PLIES: usize = 10_000;

/// Pick any piece of the side to move and send it to any other cell. Not
/// chess, just a stream of authorised moves to exercise the board.
fn random_move(board: &Board, turn: Color, rng: &mut StdRng) -> Option<Move> {
    let own: Vec<Cell> = board
        .pieces()
        .filter(|(_, p)| p.color() == turn)
        .map(|(cell, _)| cell)
        .collect();
    let from = *own.choose(rng)?;
    let targets: Vec<Cell> = board.all_cells().filter(|&c| c != from).collect();
    let to = *targets.choose(rng)?;
    Some(Move::new(from, to))
}

fn arg_or<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Plays seeded random moves and checks the board after every one.
///
///     soak [seed] [plies]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed = arg_or(&args, 1, DEFAULT_SEED);
    let plies = arg_or(&args, 2, DEFAULT_PLIES);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut turn = Color::White;
    let mut captures = 0;
    let mut played = 0;

    for ply in 0..plies {
        let Some(m) = random_move(&board, turn, &mut rng) else {
            eprintln!("{turn} has no pieces left after {ply} plies");
            break;
        };
        let outcome = match board.apply_move_detailed(&m, turn) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("ply {ply}: {} failed: {err}", m.to_uci());
                std::process::exit(1);
            }
        };
        if outcome.captured.is_some() {
            captures += 1;
        }
        if let Err(err) = board.check_invariants() {
            eprintln!("ply {ply}: after {}: {err}", m.to_uci());
            std::process::exit(1);
        }
        turn = outcome.next_turn;
        played += 1;
    }

    eprintln!(
        "seed {seed}: {played} plies, {captures} captures, {} pieces left",
        board.piece_count()
    );
}
