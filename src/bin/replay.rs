use chess_core::game::Game;

/// Replays UCI moves from the command line and prints the final board as JSON.
///
///     replay e2e4 e7e5 g1f3
fn main() {
    let moves: Vec<String> = std::env::args().skip(1).collect();
    let mut game = Game::new();

    for (ply, uci) in moves.iter().enumerate() {
        match game.play_uci(uci) {
            Ok(outcome) => {
                if let Some(captured) = outcome.captured {
                    eprintln!("{}. {uci}: {} takes {captured}", ply + 1, outcome.moved);
                } else {
                    eprintln!("{}. {uci}: {}", ply + 1, outcome.moved);
                }
            }
            Err(err) => {
                eprintln!("{}. {uci}: rejected: {err}", ply + 1);
                std::process::exit(1);
            }
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("failed to encode board: {err}");
            std::process::exit(1);
        }
    }
}
