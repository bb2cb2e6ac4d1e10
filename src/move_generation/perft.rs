//! Perft validation counters.
//!
//! Recursively explores the legal move tree with make/unmake and tallies
//! tactical event counts at the leaves. The reference values in the tests are
//! the well-known results for the standard validation positions.

use crate::errors::ChessError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

pub fn perft(game_state: &mut GameState, depth: u8) -> Result<PerftCounts, ChessError> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        let leaf = classify(game_state, mv);
        apply_move(game_state, mv)?;

        if depth == 1 {
            total.nodes += 1;
            total.captures += u64::from(leaf.capture);
            total.en_passant += u64::from(leaf.en_passant);
            total.castles += u64::from(leaf.castle);
            total.promotions += u64::from(mv.promotion.is_some());
        } else {
            let sub = perft(game_state, depth - 1)?;
            total.nodes += sub.nodes;
            total.captures += sub.captures;
            total.en_passant += sub.en_passant;
            total.castles += sub.castles;
            total.promotions += sub.promotions;
        }

        undo_move(game_state)?;
    }

    Ok(total)
}

struct LeafKind {
    capture: bool,
    en_passant: bool,
    castle: bool,
}

fn classify(game_state: &GameState, mv: Move) -> LeafKind {
    let moved = game_state.piece_on(mv.start).map(|(_, piece)| piece);
    let en_passant =
        moved == Some(PieceKind::Pawn) && game_state.en_passant_square == Some(mv.end);
    let capture = en_passant || game_state.piece_on(mv.end).is_some();
    let castle = moved == Some(PieceKind::King) && mv.start.abs_diff(mv.end) == 2;

    LeafKind {
        capture,
        en_passant,
        castle,
    }
}
