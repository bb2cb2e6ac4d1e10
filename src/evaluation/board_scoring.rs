//! Static position scoring.
//!
//! Scores are centipawns from the side to move's perspective. The opening
//! table scorer adds a per-square bonus for the mover's pieces on top of the
//! material balance; once fifty uneventful half-moves accumulate the score
//! collapses to zero.

use crate::bitboard::squares;
use crate::game_state::chess_types::*;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 5000,
    }
}

/// Material difference only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let us = game_state.side_to_move;
        let them = us.opposite();
        let mut score = 0i32;

        for piece in NON_KING_PIECES {
            let diff = game_state.piece_bb(us, piece).count_ones() as i32
                - game_state.piece_bb(them, piece).count_ones() as i32;
            score += diff * piece_value(piece);
        }

        score
    }
}

/// Material plus an opening-oriented piece-square bonus for the mover's own
/// pieces, read through `reverse_for_color`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpeningTableScorer;

impl BoardScorer for OpeningTableScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let us = game_state.side_to_move;
        let them = us.opposite();
        let mut score = 0i32;

        for piece in NON_KING_PIECES {
            let ours = game_state.piece_bb(us, piece);
            let theirs = game_state.piece_bb(them, piece);

            let diff = ours.count_ones() as i32 - theirs.count_ones() as i32;
            score += diff * piece_value(piece);

            for square in squares(ours) {
                let oriented = reverse_for_color(square, us) as usize;
                score += i32::from(OPENING_TABLE[oriented + piece.index() * 64]);
            }
        }

        if game_state.halfmove_clock >= 50 {
            return 0;
        }

        score
    }
}

#[rustfmt::skip]
const OPENING_TABLE: [i8; 384] = [
    // Pawns
    0, 0, 0, 0, 0, 0, 0, 0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
    5, 5, 10, 25, 25, 10, 5, 5,
    0, 0, 0, 20, 20, 0, 0, 0,
    5, -5, -10, 0, 0, -10, -5, 5,
    5, 10, 10, -20, -20, 10, 10, 5,
    0, 0, 0, 0, 0, 0, 0, 0,

    // Knights
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20, 0, 0, 0, 0, -20, -40,
    -30, 0, 10, 15, 15, 10, 0, -30,
    -30, 5, 15, 20, 20, 15, 5, -30,
    -30, 0, 15, 20, 20, 15, 0, -30,
    -30, 5, 10, 15, 15, 10, 5, -30,
    -40, -20, 0, 5, 5, 0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,

    // Bishops
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -10, 0, 5, 10, 10, 5, 0, -10,
    -10, 5, 5, 10, 10, 5, 5, -10,
    -10, 0, 10, 10, 10, 10, 0, -10,
    -10, 10, 10, 10, 10, 10, 10, -10,
    -10, 5, 0, 0, 0, 0, 5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,

    // Rooks
    0, 0, 0, 0, 0, 0, 0, 0,
    5, 10, 10, 10, 10, 10, 10, 5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    -5, 0, 0, 0, 0, 0, 0, -5,
    0, 0, 0, 5, 5, 0, 0, 0,

    // Queen
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10, 0, 0, 0, 0, 0, 0, -10,
    -10, 0, 5, 5, 5, 5, 0, -10,
    -5, 0, 5, 5, 5, 5, 0, -5,
    0, 0, 5, 5, 5, 5, 0, -5,
    -10, 5, 5, 5, 5, 5, 0, -10,
    -10, 0, 5, 0, 0, 0, 0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,

    // King
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    20, 20, 0, 0, 0, 0, 20, 20,
    20, 30, 10, 0, 0, 10, 30, 20,
];
