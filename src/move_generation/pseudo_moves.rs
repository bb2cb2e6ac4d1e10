//! Piece movement ignoring pins and checks.
//!
//! The one shared primitive between move generation and attack queries:
//! destination squares for a piece of a given color on a given square against
//! an arbitrary occupancy, with friendly pieces already excluded. Pawn pushes
//! are blocked by any piece and the double push is gated on the single push;
//! pawn diagonals only count onto occupied squares (en passant is the
//! generator's business).

use crate::bitboard::{single, BitBoard};
use crate::game_state::chess_types::*;
use crate::moves::king_moves::king_moves;
use crate::moves::knight_moves::knight_moves;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::slider_hash::{bishop_moves, queen_moves, rook_moves};

pub fn pseudo_moves(
    game_state: &GameState,
    piece: PieceKind,
    color: Color,
    square: Square,
    occupancy: BitBoard,
) -> BitBoard {
    let moves = match piece {
        PieceKind::Pawn => pawn_pseudo_moves(color, square, occupancy),
        PieceKind::Knight => knight_moves(square),
        PieceKind::King => king_moves(square),
        PieceKind::Bishop => bishop_moves(square, occupancy),
        PieceKind::Rook => rook_moves(square, occupancy),
        PieceKind::Queen => queen_moves(square, occupancy),
    };

    moves & !game_state.color_bb(color)
}

fn pawn_pseudo_moves(color: Color, square: Square, occupancy: BitBoard) -> BitBoard {
    let forward = match color {
        Color::Light => NORTH,
        Color::Dark => SOUTH,
    };
    let can_double_step = match color {
        Color::Light => square_rank(square) == 1,
        Color::Dark => square_rank(square) == 6,
    };

    let mut moves = 0u64;
    let one_step = square as i16 + forward as i16;
    if (0..64).contains(&one_step) {
        moves |= single(one_step as Square) & !occupancy;
        if can_double_step && moves != 0 {
            let two_steps = one_step + forward as i16;
            moves |= single(two_steps as Square) & !occupancy;
        }
    }

    moves | (pawn_attacks(color, square) & occupancy)
}
