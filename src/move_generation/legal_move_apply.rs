//! In-place move making and unmaking.
//!
//! `apply_move` journals everything needed for reversal before mutating, so
//! `undo_move` restores the position bit for bit. Legality is the move
//! generator's job; the only validation here is that the start square holds a
//! piece of the side to move.

use crate::errors::ChessError;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves::pseudo_moves;
use crate::moves::chess_move::Move;

pub fn apply_move(game_state: &mut GameState, mv: Move) -> Result<(), ChessError> {
    let mover = game_state.side_to_move;

    let Some((color, moved_piece)) = game_state.piece_on(mv.start) else {
        return Err(ChessError::InvalidMove(format!(
            "no piece on the start square of {mv}"
        )));
    };
    if color != mover {
        return Err(ChessError::InvalidMove(format!(
            "piece on the start square of {mv} does not belong to the side to move"
        )));
    }

    let undo = build_undo(game_state, mv, moved_piece);
    game_state.undo_stack.push(undo);

    if moved_piece != PieceKind::Pawn && undo.captured_piece.is_none() {
        game_state.halfmove_clock += 1;
    } else {
        game_state.halfmove_clock = 0;
    }

    update_castling_rights(game_state, mv.start, mv.end);
    update_en_passant_square(game_state, mv, moved_piece, mover);

    // Board mutation, in an order the undo path reverses exactly.
    if undo.captured_piece.is_some() {
        game_state.clear_square(mv.end);
    }
    match undo.flag {
        MoveFlag::EnPassant => {
            let captured = en_passant_capture(
                undo.prev_en_passant_square
                    .expect("en passant flag implies a target square"),
            );
            game_state.clear_square(captured);
        }
        MoveFlag::LightQueenside => relocate_rook(game_state, mover, A1, D1),
        MoveFlag::LightKingside => relocate_rook(game_state, mover, H1, F1),
        MoveFlag::DarkQueenside => relocate_rook(game_state, mover, A8, D8),
        MoveFlag::DarkKingside => relocate_rook(game_state, mover, H8, F8),
        MoveFlag::Promotion | MoveFlag::None => {}
    }

    game_state.clear_square(mv.start);
    game_state.set_piece(mv.end, mv.promotion.unwrap_or(moved_piece), mover);

    if mover == Color::Dark {
        game_state.fullmove_number += 1;
    }
    game_state.side_to_move = mover.opposite();

    Ok(())
}

pub fn undo_move(game_state: &mut GameState) -> Result<(), ChessError> {
    let Some(undo) = game_state.undo_stack.pop() else {
        return Err(ChessError::EmptyUndoStack);
    };

    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.side_to_move = game_state.side_to_move.opposite();

    let mover = game_state.side_to_move;
    let enemy = mover.opposite();
    if mover == Color::Dark {
        game_state.fullmove_number -= 1;
    }

    game_state.clear_square(undo.end);
    if undo.flag != MoveFlag::EnPassant {
        if let Some(captured) = undo.captured_piece {
            game_state.set_piece(undo.end, captured, enemy);
        }
    }

    match undo.flag {
        MoveFlag::EnPassant => {
            let captured = en_passant_capture(
                undo.prev_en_passant_square
                    .expect("en passant flag implies a target square"),
            );
            game_state.set_piece(captured, PieceKind::Pawn, enemy);
        }
        MoveFlag::LightQueenside => relocate_rook(game_state, mover, D1, A1),
        MoveFlag::LightKingside => relocate_rook(game_state, mover, F1, H1),
        MoveFlag::DarkQueenside => relocate_rook(game_state, mover, D8, A8),
        MoveFlag::DarkKingside => relocate_rook(game_state, mover, F8, H8),
        MoveFlag::Promotion | MoveFlag::None => {}
    }

    if undo.flag == MoveFlag::Promotion {
        game_state.set_piece(undo.start, PieceKind::Pawn, mover);
    } else {
        game_state.set_piece(undo.start, undo.moved_piece, mover);
    }

    Ok(())
}

fn build_undo(game_state: &GameState, mv: Move, moved_piece: PieceKind) -> UndoState {
    let mut captured_piece = game_state.piece_on(mv.end).map(|(_, piece)| piece);
    let mut flag = MoveFlag::None;

    if game_state.en_passant_square == Some(mv.end) && moved_piece == PieceKind::Pawn {
        flag = MoveFlag::EnPassant;
        captured_piece = Some(PieceKind::Pawn);
    } else if moved_piece == PieceKind::King && mv == LIGHT_KINGSIDE_CASTLE {
        flag = MoveFlag::LightKingside;
    } else if moved_piece == PieceKind::King && mv == LIGHT_QUEENSIDE_CASTLE {
        flag = MoveFlag::LightQueenside;
    } else if moved_piece == PieceKind::King && mv == DARK_KINGSIDE_CASTLE {
        flag = MoveFlag::DarkKingside;
    } else if moved_piece == PieceKind::King && mv == DARK_QUEENSIDE_CASTLE {
        flag = MoveFlag::DarkQueenside;
    } else if mv.promotion.is_some() {
        flag = MoveFlag::Promotion;
    }

    UndoState {
        moved_piece,
        captured_piece,
        start: mv.start,
        end: mv.end,
        prev_en_passant_square: game_state.en_passant_square,
        prev_castling_rights: game_state.castling_rights,
        prev_halfmove_clock: game_state.halfmove_clock,
        flag,
    }
}

/// Any move touching a rook or king home square drops the matching rights;
/// this covers the moving-rook, moving-king, and captured-rook cases at once.
fn update_castling_rights(game_state: &mut GameState, start: Square, end: Square) {
    if start == E1 || start == H1 || end == H1 {
        game_state.castling_rights &= !CASTLE_LIGHT_KINGSIDE;
    }
    if start == E1 || start == A1 || end == A1 {
        game_state.castling_rights &= !CASTLE_LIGHT_QUEENSIDE;
    }
    if start == E8 || start == H8 || end == H8 {
        game_state.castling_rights &= !CASTLE_DARK_KINGSIDE;
    }
    if start == E8 || start == A8 || end == A8 {
        game_state.castling_rights &= !CASTLE_DARK_QUEENSIDE;
    }
}

/// A double push leaves the skipped square as the en-passant target, gated on
/// the pseudo-push probe from that square against the pre-move board.
fn update_en_passant_square(
    game_state: &mut GameState,
    mv: Move,
    moved_piece: PieceKind,
    mover: Color,
) {
    let start_rank = square_rank(mv.start);
    let end_rank = square_rank(mv.end);

    game_state.en_passant_square = if moved_piece == PieceKind::Pawn
        && start_rank == 1
        && end_rank == 3
        && pseudo_moves(
            game_state,
            PieceKind::Pawn,
            mover,
            mv.start + 8,
            game_state.occupancy_all,
        ) != 0
    {
        Some(mv.start + 8)
    } else if moved_piece == PieceKind::Pawn
        && start_rank == 6
        && end_rank == 4
        && pseudo_moves(
            game_state,
            PieceKind::Pawn,
            mover,
            mv.start - 8,
            game_state.occupancy_all,
        ) != 0
    {
        Some(mv.start - 8)
    } else {
        None
    };
}

fn relocate_rook(game_state: &mut GameState, color: Color, from: Square, to: Square) {
    game_state.clear_square(from);
    game_state.set_piece(to, PieceKind::Rook, color);
}
