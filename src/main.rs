use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};

use drawback_chess::chess_errors::ChessResult;
use drawback_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use drawback_chess::game_state::chess_types::GameState;
use drawback_chess::game_state::drawbacks::{all_drawbacks, lookup_drawback, Drawback};
use drawback_chess::move_generation::move_generator::generate_all_moves;
use drawback_chess::move_generation::perft::{perft_divide, perft_parallel};
use drawback_chess::search::board_scoring::evaluate;
use drawback_chess::search::iterative_deepening::SearchConfig;
use drawback_chess::search::search_progress::spawn_search;
use drawback_chess::utils::game_record::GameRecord;
use drawback_chess::utils::match_harness::{self_play, MatchConfig};
use drawback_chess::utils::render_game_state::render_game_state;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drawback chess rules engine and searcher", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the engine play itself and print the game record.
    Selfplay {
        #[arg(long, default_value_t = 3)]
        depth: u8,
        /// Seconds per move.
        #[arg(long, default_value_t = 1.0)]
        time: f64,
        #[arg(long, default_value_t = 200)]
        max_plies: u16,
        #[arg(long)]
        light_drawback: Option<String>,
        #[arg(long)]
        dark_drawback: Option<String>,
        #[arg(long, default_value_t = 0)]
        opening_plies: u8,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Search a position in the background, reporting progress.
    Search {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 6)]
        depth: u8,
        #[arg(long, default_value_t = 5.0)]
        time: f64,
    },
    /// Print the static evaluation of a position.
    Eval {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },
    /// List generated moves for the side to move.
    Moves {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        /// Drawback applied to the side to move.
        #[arg(long)]
        drawback: Option<String>,
    },
    /// Count leaf nodes.
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 4)]
        depth: u8,
        #[arg(long)]
        divide: bool,
    },
    /// List registered drawbacks.
    Drawbacks,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();

    if let Err(e) = run(cli.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn parse_drawback(key: Option<&str>) -> ChessResult<Option<Drawback>> {
    key.map(lookup_drawback).transpose()
}

fn run(command: Command) -> ChessResult<()> {
    match command {
        Command::Selfplay {
            depth,
            time,
            max_plies,
            light_drawback,
            dark_drawback,
            opening_plies,
            seed,
        } => {
            let config = MatchConfig {
                max_plies,
                search: SearchConfig::new(depth, time),
                light_drawback: parse_drawback(light_drawback.as_deref())?,
                dark_drawback: parse_drawback(dark_drawback.as_deref())?,
                opening_plies,
                seed,
            };
            let result = self_play(&config)?;
            println!("{}\n", render_game_state(&result.final_state));
            print!("{}", GameRecord::from_match(&result, "iterative", "iterative").to_text());
        }
        Command::Search { fen, depth, time } => {
            let game = GameState::from_fen(&fen)?;
            let handle = spawn_search(game, SearchConfig::new(depth, time))?;
            let mut last_depth = 0;
            while !handle.is_finished() {
                let progress = handle.progress();
                if progress.current_depth() != last_depth {
                    last_depth = progress.current_depth();
                    println!(
                        "depth {} eval {} best {} nodes {}",
                        last_depth,
                        progress.current_eval(),
                        progress
                            .best_move_so_far()
                            .map_or_else(|| "-".to_owned(), |mv| mv.to_string()),
                        progress.nodes()
                    );
                }
                thread::sleep(Duration::from_millis(20));
            }
            let result = handle.join()?;
            match result.best_move {
                Some(mv) => println!("bestmove {mv} score {} depth {}", result.best_score, result.reached_depth),
                None => println!("bestmove none score {}", result.best_score),
            }
        }
        Command::Eval { fen } => {
            let game = GameState::from_fen(&fen)?;
            println!("{}\n", render_game_state(&game));
            println!("eval {}", evaluate(&game));
        }
        Command::Moves { fen, drawback } => {
            let mut game = GameState::from_fen(&fen)?;
            game.set_drawback(game.side_to_move, parse_drawback(drawback.as_deref())?);
            let moves = generate_all_moves(&game);
            let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
            println!("{} moves: {}", moves.len(), listed.join(" "));
        }
        Command::Perft { fen, depth, divide } => {
            let game = GameState::from_fen(&fen)?;
            if divide {
                for (mv, nodes) in perft_divide(&game, depth) {
                    println!("{mv}: {nodes}");
                }
            }
            let counts = perft_parallel(&game, depth);
            println!(
                "nodes {} captures {} en_passant {} castles {} king_captures {}",
                counts.nodes, counts.captures, counts.en_passant, counts.castles, counts.king_captures
            );
        }
        Command::Drawbacks => {
            for drawback in all_drawbacks() {
                println!("{:<18} {:<14} {}", drawback.key, drawback.name, drawback.description);
            }
        }
    }
    Ok(())
}
