//! Interactive text driver for the move-generation core.
//!
//! Reads commands from stdin, one per line:
//!
//! ```text
//! start                  reset to the starting position
//! position <fen>         load a position from FEN
//! show                   render the board
//! fen                    print the current FEN
//! moves                  list the legal moves
//! move <long algebraic>  play a move (e.g. e2e4, a7a8q)
//! undo                   take back the last move
//! perft <depth>          count leaf nodes of the legal move tree
//! eval                   static score of the position
//! random <n>             play up to n random legal moves
//! quit                   exit
//! ```

use std::io::{self, BufRead, Write};

use rand::prelude::IndexedRandom;

use quince_chess::evaluation::board_scoring::{BoardScorer, OpeningTableScorer};
use quince_chess::game_state::chess_types::GameState;
use quince_chess::move_generation::legal_move_apply::{apply_move, undo_move};
use quince_chess::move_generation::legal_move_generator::generate_legal_moves;
use quince_chess::move_generation::perft::perft;
use quince_chess::moves::chess_move::Move;
use quince_chess::utils::render_game_state::render_game_state;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut game = GameState::new_game();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match command {
            "quit" | "exit" => break,
            "start" => {
                game = GameState::new_game();
                writeln!(stdout, "{}", render_game_state(&game))?;
            }
            "position" => match GameState::from_fen(rest) {
                Ok(parsed) => {
                    game = parsed;
                    writeln!(stdout, "{}", render_game_state(&game))?;
                }
                Err(err) => writeln!(stdout, "error: {err}")?,
            },
            "show" => writeln!(stdout, "{}", render_game_state(&game))?,
            "fen" => writeln!(stdout, "{}", game.get_fen())?,
            "moves" => {
                let moves = generate_legal_moves(&game);
                let rendered: Vec<String> = moves.iter().map(Move::to_string).collect();
                writeln!(stdout, "{} legal: {}", moves.len(), rendered.join(" "))?;
            }
            "move" => match Move::from_long_algebraic(rest) {
                Ok(mv) if generate_legal_moves(&game).contains(&mv) => {
                    if let Err(err) = apply_move(&mut game, mv) {
                        writeln!(stdout, "error: {err}")?;
                    } else {
                        writeln!(stdout, "{}", render_game_state(&game))?;
                    }
                }
                Ok(mv) => writeln!(stdout, "error: {mv} is not legal here")?,
                Err(err) => writeln!(stdout, "error: {err}")?,
            },
            "undo" => match undo_move(&mut game) {
                Ok(()) => writeln!(stdout, "{}", render_game_state(&game))?,
                Err(err) => writeln!(stdout, "error: {err}")?,
            },
            "perft" => match rest.parse::<u8>() {
                Ok(depth) => match perft(&mut game, depth) {
                    Ok(counts) => writeln!(
                        stdout,
                        "nodes {} captures {} en-passant {} castles {} promotions {}",
                        counts.nodes,
                        counts.captures,
                        counts.en_passant,
                        counts.castles,
                        counts.promotions
                    )?,
                    Err(err) => writeln!(stdout, "error: {err}")?,
                },
                Err(_) => writeln!(stdout, "error: perft needs a depth")?,
            },
            "eval" => {
                writeln!(stdout, "score {}", OpeningTableScorer.score(&game))?;
            }
            "random" => {
                let count = rest.parse::<u32>().unwrap_or(1);
                let mut rng = rand::rng();
                for _ in 0..count {
                    let moves = generate_legal_moves(&game);
                    let Some(mv) = moves.as_slice().choose(&mut rng) else {
                        writeln!(stdout, "no legal moves; stopping")?;
                        break;
                    };
                    writeln!(stdout, "playing {mv}")?;
                    if let Err(err) = apply_move(&mut game, *mv) {
                        writeln!(stdout, "error: {err}")?;
                        break;
                    }
                }
                writeln!(stdout, "{}", render_game_state(&game))?;
            }
            _ => writeln!(stdout, "unknown command: {command}")?,
        }
        stdout.flush()?;
    }

    Ok(())
}
