//! Attack queries built on the symmetric-attacker trick: piece X on square A
//! attacks square B exactly when a piece of the same kind placed on B would
//! attack A. Placing each kind on the queried square with the defender's
//! color and intersecting with the enemy boards of that kind therefore finds
//! every attacker, pawns included (the defender-colored pawn pattern is the
//! mirror of the enemy's).

use crate::bitboard::BitBoard;
use crate::game_state::chess_types::*;
use crate::move_generation::pseudo_moves::pseudo_moves;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.piece_bb(color, PieceKind::King);
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

/// Every enemy piece attacking `square`, seen from `defender_color`, against
/// an arbitrary occupancy.
pub fn attackers_of(
    game_state: &GameState,
    square: Square,
    defender_color: Color,
    occupancy: BitBoard,
) -> BitBoard {
    let enemy = defender_color.opposite();
    let mut attackers = 0u64;

    for piece in ALL_PIECE_KINDS {
        attackers |= pseudo_moves(game_state, piece, defender_color, square, occupancy)
            & game_state.piece_bb(enemy, piece);
    }

    attackers
}

#[inline]
pub fn is_square_attacked(
    game_state: &GameState,
    square: Square,
    defender_color: Color,
    occupancy: BitBoard,
) -> bool {
    attackers_of(game_state, square, defender_color, occupancy) != 0
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king, color, game_state.occupancy_all)
}

#[cfg(test)]
mod tests {
    use super::{attackers_of, is_king_in_check, king_square};
    use crate::game_state::chess_types::{Color, GameState};
    use crate::utils::algebraic::{algebraic_to_bitboard, algebraic_to_square};

    #[test]
    fn king_square_finds_each_king() {
        let game = GameState::new_game();
        assert_eq!(king_square(&game, Color::Light), Some(4));
        assert_eq!(king_square(&game, Color::Dark), Some(60));
    }

    #[test]
    fn pawn_attackers_use_the_mirrored_pattern() {
        // A dark pawn on d5 attacks c4 and e4; a light pawn on d5 does not.
        let game = GameState::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let d5 = algebraic_to_bitboard("d5").expect("d5 should parse");

        let c4 = algebraic_to_square("c4").expect("c4 should parse");
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        let c6 = algebraic_to_square("c6").expect("c6 should parse");

        assert_eq!(attackers_of(&game, c4, Color::Light, game.occupancy_all), d5);
        assert_eq!(attackers_of(&game, e4, Color::Light, game.occupancy_all), d5);
        assert_eq!(attackers_of(&game, c6, Color::Light, game.occupancy_all), 0);
    }

    #[test]
    fn knight_attackers_are_symmetric() {
        let game = GameState::from_fen("4k3/8/8/3n4/8/4P3/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let e3 = algebraic_to_square("e3").expect("e3 should parse");
        let d5 = algebraic_to_bitboard("d5").expect("d5 should parse");
        assert_eq!(attackers_of(&game, e3, Color::Light, game.occupancy_all), d5);
    }

    #[test]
    fn sliders_attack_through_empty_squares_only() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/r3K3 w - - 0 1")
            .expect("FEN should parse");
        let a1 = algebraic_to_bitboard("a1").expect("a1 should parse");

        // Rook on a1 reaches e1 along the empty first rank.
        assert_eq!(attackers_of(&game, 4, Color::Light, game.occupancy_all), a1);
        assert!(is_king_in_check(&game, Color::Light));

        // Interpose a piece and the attack disappears.
        let blocked = GameState::from_fen("4k3/8/8/8/8/8/4P3/r1N1K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(!is_king_in_check(&blocked, Color::Light));
    }
}
