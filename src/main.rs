//! Terminal driver.
//!
//! Run with:
//! `cargo run --release -- --difficulty hard --computer-color white`
//! `cargo run --release -- --two-player`
//! `cargo run --release -- --self-play --difficulty easy`
//!
//! Set `RUST_LOG=debug` to see per-search statistics.

use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use minimax_chess::engines::engine_minimax::MinimaxEngine;
use minimax_chess::errors::ChessError;
use minimax_chess::game::config::{Difficulty, GameConfig, GameMode};
use minimax_chess::game::controller::{GameController, TurnOutcome};
use minimax_chess::game_state::chess_types::{Color, PieceKind, Square};
use minimax_chess::game_state::game_state::Position;
use minimax_chess::game_state::game_status::classify;
use minimax_chess::utils::algebraic::algebraic_to_square;
use minimax_chess::utils::move_history::{
    captured_summary, export_game, history_lines, result_token, HISTORY_WINDOW,
};
use minimax_chess::utils::render_game_state::{render_game_state, render_with_highlights};
use minimax_chess::utils::self_play::{play_self_play, SelfPlayConfig};

const SEARCH_TIMEOUT: Duration = Duration::from_secs(600);

const HELP: &str = "\
commands:
  e2e4, e7e8q      move (coordinate notation, optional promotion piece)
  moves <square>   show legal destinations of a piece
  history          last moves and captured pieces
  export           print the game with PGN-style headers
  difficulty [lvl] cycle or set easy / medium / hard
  board            print the board
  new              start over
  quit";

struct Options {
    config: GameConfig,
    fen: Option<String>,
    self_play: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut config = GameConfig::default();
    let mut computer = Color::Black;
    let mut two_player = false;
    let mut fen = None;
    let mut self_play = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--difficulty" => config.difficulty = value("--difficulty")?.parse()?,
            "--computer-color" => {
                computer = match value("--computer-color")?.to_ascii_lowercase().as_str() {
                    "white" | "w" => Color::White,
                    "black" | "b" => Color::Black,
                    other => return Err(format!("unknown colour '{other}'")),
                }
            }
            "--delay-ms" => {
                let ms: u64 = value("--delay-ms")?
                    .parse()
                    .map_err(|e| format!("invalid --delay-ms: {e}"))?;
                config.thinking_delay = Duration::from_millis(ms);
            }
            "--fen" => fen = Some(value("--fen")?),
            "--two-player" => two_player = true,
            "--self-play" => self_play = true,
            "--help" | "-h" => return Err(String::new()),
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    config.mode = if two_player {
        GameMode::HumanVsHuman
    } else if self_play {
        GameMode::ComputerVsComputer
    } else {
        GameMode::HumanVsComputer { computer }
    };

    Ok(Options {
        config,
        fen,
        self_play,
    })
}

fn usage() -> String {
    "usage: minimax_chess [--difficulty easy|medium|hard] [--computer-color white|black] \
     [--two-player] [--self-play] [--delay-ms N] [--fen FEN]"
        .to_owned()
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args).map_err(|e| {
        if e.is_empty() {
            usage()
        } else {
            format!("{e}\n{}", usage())
        }
    })?;

    let start = match &options.fen {
        Some(fen) => Position::from_fen(fen).map_err(|e| e.to_string())?,
        None => Position::new_game(),
    };

    if options.self_play {
        return run_self_play(&start, options.config.difficulty);
    }

    let mut game = GameController::from_position(options.config, start);
    run_repl(&mut game)
}

fn run_self_play(start: &Position, difficulty: Difficulty) -> Result<(), String> {
    let mut white = MinimaxEngine::new(difficulty);
    let mut black = MinimaxEngine::new(difficulty);
    let seed = chrono::Local::now().timestamp() as u64;
    let config = SelfPlayConfig {
        opening_min_plies: 2,
        opening_max_plies: 6,
        ..SelfPlayConfig::default()
    };

    let result =
        play_self_play(&mut white, &mut black, start, seed, config).map_err(|e| e.to_string())?;

    println!("{}", render_game_state(&result.final_position));
    println!(
        "outcome: {:?} after {} plies ({} random opening plies)",
        result.outcome,
        result.record.len(),
        result.opening_plies
    );
    println!(
        "time: white {:.1}s, black {:.1}s",
        result.white_time.as_secs_f64(),
        result.black_time.as_secs_f64()
    );

    let status = classify(&result.final_position);
    let result_text = result_token(status, result.final_position.side_to_move());
    println!("{}", export_game(&result.initial, &result.record, result_text));
    Ok(())
}

fn run_repl(game: &mut GameController) -> Result<(), String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{HELP}\n");
    print_board(game);

    loop {
        if game.is_computer_turn() {
            play_computer_turn(game)?;
            continue;
        }

        print!("{} to move> ", game.position().side_to_move());
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.map_err(|e| e.to_string())?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "quit" | "exit" => return Ok(()),
            "help" => println!("{HELP}"),
            "board" => print_board(game),
            "new" => {
                game.reset();
                print_board(game);
            }
            "difficulty" => {
                let difficulty = match words.next() {
                    Some(text) => match text.parse::<Difficulty>() {
                        Ok(d) => {
                            game.set_difficulty(d);
                            d
                        }
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                    None => game.cycle_difficulty(),
                };
                println!("difficulty: {difficulty} (depth {})", difficulty.depth());
            }
            "moves" => match words.next().map(algebraic_to_square) {
                Some(Ok(square)) => {
                    let targets = game.legal_moves(square);
                    println!("{}", render_with_highlights(game.position(), &targets));
                    let names: Vec<String> = targets.iter().map(|sq| sq.to_string()).collect();
                    println!("{square}: {}", names.join(" "));
                }
                Some(Err(e)) => println!("{e}"),
                None => println!("usage: moves <square>"),
            },
            "history" => {
                for line in history_lines(game.record(), HISTORY_WINDOW) {
                    println!("  {line}");
                }
                println!("captured white: {}", captured_summary(game.record(), Color::White));
                println!("captured black: {}", captured_summary(game.record(), Color::Black));
            }
            "export" => {
                let result = result_token(game.status(), game.position().side_to_move());
                println!("{}", export_game(game.initial_position(), game.record(), result));
            }
            text => {
                if let Err(e) = play_human_move(game, text, &mut lines) {
                    println!("{e}");
                }
            }
        }
    }
}

fn play_human_move(
    game: &mut GameController,
    text: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<(), String> {
    let (from, to, promotion) = parse_coordinate_move(text)?;

    match game.attempt_move(from, to).map_err(|e| e.to_string())? {
        TurnOutcome::Moved(_) => {}
        TurnOutcome::PromotionRequired { .. } => {
            let kind = match promotion {
                Some(kind) => Some(kind),
                None => {
                    print!("promote to (q/r/b/n)? ");
                    io::stdout().flush().map_err(|e| e.to_string())?;
                    lines
                        .next()
                        .transpose()
                        .map_err(|e| e.to_string())?
                        .and_then(|answer| promotion_from_char(answer.trim()))
                }
            };
            match kind {
                Some(kind) => {
                    game.complete_promotion(kind).map_err(|e| e.to_string())?;
                }
                None => {
                    game.cancel_promotion().map_err(|e| e.to_string())?;
                    return Err("promotion cancelled".to_owned());
                }
            }
        }
    }

    print_board(game);
    Ok(())
}

fn play_computer_turn(game: &mut GameController) -> Result<(), String> {
    println!(
        "{} is thinking ({})...",
        game.position().side_to_move(),
        game.config().difficulty
    );
    game.request_computer_move().map_err(|e| e.to_string())?;

    match game.wait_for_computer_move(SEARCH_TIMEOUT) {
        Ok(Some(reply)) => {
            println!(
                "computer plays {} (score {}, {} nodes)",
                reply.turn.played, reply.search.score, reply.search.nodes
            );
            print_board(game);
            Ok(())
        }
        Ok(None) => Err("computer search did not finish".to_owned()),
        Err(ChessError::NoLegalMoves) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_coordinate_move(text: &str) -> Result<(Square, Square, Option<PieceKind>), String> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(format!("unknown command '{text}' (type help)"));
    }
    let from = algebraic_to_square(&text[0..2]).map_err(|e| e.to_string())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|e| e.to_string())?;
    let promotion = match text.get(4..) {
        Some("") | None => None,
        Some(suffix) => Some(
            promotion_from_char(suffix)
                .ok_or_else(|| format!("invalid promotion piece '{suffix}'"))?,
        ),
    };
    Ok((from, to, promotion))
}

fn promotion_from_char(text: &str) -> Option<PieceKind> {
    match text.to_ascii_lowercase().as_str() {
        "q" => Some(PieceKind::Queen),
        "r" => Some(PieceKind::Rook),
        "b" => Some(PieceKind::Bishop),
        "n" => Some(PieceKind::Knight),
        _ => None,
    }
}

fn print_board(game: &GameController) {
    println!("{}", render_game_state(game.position()));
    println!("status: {}", game.status());
}
