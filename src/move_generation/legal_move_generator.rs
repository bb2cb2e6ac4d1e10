//! Single-pass legal move generation.
//!
//! One walk over the position classifies every attack on the friendly king
//! before any move is emitted. Checks shrink the target mask (capture the
//! checker or interpose on its ray), sliders with exactly one friendly
//! blocker on a ray register a pin, and from then on every non-king move is a
//! plain intersection. King moves are validated against attack queries with
//! the king lifted off the board, since a slider keeps attacking through the
//! square the king vacates.

use crate::bitboard::{above, below, first_set, left_of, right_of, single, squares, BitBoard, ALL};
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{is_square_attacked, king_square};
use crate::move_generation::pseudo_moves::pseudo_moves;
use crate::moves::chess_move::Move;
use crate::moves::slider_hash::{bishop_moves, rook_moves};

/// All legal moves for the side to move. Order is unspecified.
pub fn generate_legal_moves(game_state: &GameState) -> Vec<Move> {
    let Some(king) = king_square(game_state, game_state.side_to_move) else {
        return Vec::new();
    };

    let mut generator = MoveGenerator::new(game_state, king);
    generator.run();
    generator.moves
}

struct MoveGenerator<'a> {
    state: &'a GameState,
    my_color: Color,
    opponent_color: Color,
    king: Square,

    attacks_on_king: u8,
    targets: BitBoard,
    pins: BitBoard,
    pin_rays: [BitBoard; 64],

    moves: Vec<Move>,
}

impl<'a> MoveGenerator<'a> {
    fn new(state: &'a GameState, king: Square) -> Self {
        Self {
            state,
            my_color: state.side_to_move,
            opponent_color: state.side_to_move.opposite(),
            king,
            attacks_on_king: 0,
            targets: ALL,
            pins: 0,
            pin_rays: [0; 64],
            moves: Vec::with_capacity(48),
        }
    }

    fn run(&mut self) {
        self.handle_leaper_attacks(PieceKind::Pawn);
        self.handle_leaper_attacks(PieceKind::Knight);
        self.handle_slider_attacks();

        if self.attacks_on_king <= 1 {
            self.standard_moves();
            if self.attacks_on_king == 0 {
                self.generate_castling();
            }
            if let Some(en_passant_square) = self.state.en_passant_square {
                self.en_passant_captures(en_passant_square);
            }
        }

        self.plain_king_moves();
    }

    /// A leaper checks the king exactly when the same kind of leaper standing
    /// on the king square would reach it.
    fn handle_leaper_attacks(&mut self, piece: PieceKind) {
        let attacks = pseudo_moves(
            self.state,
            piece,
            self.my_color,
            self.king,
            self.state.occupancy_all,
        ) & self.state.piece_bb(self.opponent_color, piece);

        if attacks != 0 {
            self.attacks_on_king += attacks.count_ones() as u8;
            self.targets &= attacks;
        }
    }

    /// Classify every slider ray touching the king. Reachability is looked up
    /// against the enemy occupancy alone, so each ray runs through friendly
    /// pieces up to the first enemy piece; a ray holding an enemy slider is
    /// either a check (no friendly blocker) or a pin (exactly one).
    fn handle_slider_attacks(&mut self) {
        let rook_queen = self.state.piece_bb(self.opponent_color, PieceKind::Rook)
            | self.state.piece_bb(self.opponent_color, PieceKind::Queen);
        let bishop_queen = self.state.piece_bb(self.opponent_color, PieceKind::Bishop)
            | self.state.piece_bb(self.opponent_color, PieceKind::Queen);

        let enemy_occupancy = self.state.color_bb(self.opponent_color);
        let king_file = square_file(self.king);
        let king_rank = square_rank(self.king);

        let rook_reach = rook_moves(self.king, enemy_occupancy);
        self.handle_slider_ray(rook_queen, rook_reach & above(king_rank));
        self.handle_slider_ray(rook_queen, rook_reach & below(king_rank));
        self.handle_slider_ray(rook_queen, rook_reach & left_of(king_file));
        self.handle_slider_ray(rook_queen, rook_reach & right_of(king_file));

        let bishop_reach = bishop_moves(self.king, enemy_occupancy);
        self.handle_slider_ray(bishop_queen, bishop_reach & above(king_rank) & left_of(king_file));
        self.handle_slider_ray(bishop_queen, bishop_reach & above(king_rank) & right_of(king_file));
        self.handle_slider_ray(bishop_queen, bishop_reach & below(king_rank) & left_of(king_file));
        self.handle_slider_ray(bishop_queen, bishop_reach & below(king_rank) & right_of(king_file));
    }

    fn handle_slider_ray(&mut self, opponent_sliders: BitBoard, ray: BitBoard) {
        let attackers = opponent_sliders & ray;
        if attackers == 0 {
            return;
        }

        let our_blockers = ray & self.state.color_bb(self.my_color);
        if our_blockers == 0 {
            self.attacks_on_king += attackers.count_ones() as u8;
            self.targets &= ray;
        } else if our_blockers.count_ones() == 1 && self.attacks_on_king <= 1 {
            self.pins |= our_blockers;
            self.pin_rays[first_set(our_blockers) as usize] = ray;
        }
    }

    /// Non-king moves. Unpinned pieces move anywhere inside the target mask;
    /// pinned pieces additionally stay on their pin ray. A pinned knight has
    /// no move on any ray, so the intersection silently empties.
    fn standard_moves(&mut self) {
        for piece in NON_KING_PIECES {
            let positions = self.state.piece_bb(self.my_color, piece);

            for start in squares(positions & !self.pins) {
                let ends = pseudo_moves(
                    self.state,
                    piece,
                    self.my_color,
                    start,
                    self.state.occupancy_all,
                );
                self.enter_moves(start, piece, ends);
            }

            for start in squares(positions & self.pins) {
                let ends = pseudo_moves(
                    self.state,
                    piece,
                    self.my_color,
                    start,
                    self.state.occupancy_all,
                ) & self.pin_rays[start as usize];
                self.enter_moves(start, piece, ends);
            }
        }
    }

    fn generate_castling(&mut self) {
        let occupancy = self.state.occupancy_all;
        let rights = self.state.castling_rights;

        match self.my_color {
            Color::Light => {
                if rights & CASTLE_LIGHT_QUEENSIDE != 0
                    && occupancy & LIGHT_QUEENSIDE_PATH == 0
                    && !self.attacked(D1)
                    && !self.attacked(C1)
                {
                    self.moves.push(LIGHT_QUEENSIDE_CASTLE);
                }
                if rights & CASTLE_LIGHT_KINGSIDE != 0
                    && occupancy & LIGHT_KINGSIDE_PATH == 0
                    && !self.attacked(F1)
                    && !self.attacked(G1)
                {
                    self.moves.push(LIGHT_KINGSIDE_CASTLE);
                }
            }
            Color::Dark => {
                if rights & CASTLE_DARK_QUEENSIDE != 0
                    && occupancy & DARK_QUEENSIDE_PATH == 0
                    && !self.attacked(D8)
                    && !self.attacked(C8)
                {
                    self.moves.push(DARK_QUEENSIDE_CASTLE);
                }
                if rights & CASTLE_DARK_KINGSIDE != 0
                    && occupancy & DARK_KINGSIDE_PATH == 0
                    && !self.attacked(F8)
                    && !self.attacked(G8)
                {
                    self.moves.push(DARK_KINGSIDE_CASTLE);
                }
            }
        }
    }

    fn attacked(&self, square: Square) -> bool {
        is_square_attacked(self.state, square, self.my_color, self.state.occupancy_all)
    }

    fn en_passant_captures(&mut self, en_passant_square: Square) {
        let electable_pawns = pseudo_moves(
            self.state,
            PieceKind::Pawn,
            self.opponent_color,
            en_passant_square,
            self.state.occupancy_all,
        ) & self.state.piece_bb(self.my_color, PieceKind::Pawn);

        let capture_pawn = en_passant_capture(en_passant_square);
        if self.targets & single(capture_pawn) != 0 {
            // The opponent's pawn is already a target, so capturing it en
            // passant resolves the same check: admit the capture square too.
            self.targets |= single(en_passant_square);
        }

        if square_rank(self.king) == square_rank(capture_pawn)
            && electable_pawns.count_ones() == 1
        {
            // The only case where one capture empties two squares of the same
            // rank at once; the pin scan cannot see it, so probe the rank
            // with the captured pawn removed.
            let capturer = first_set(electable_pawns);
            let occupancy = self.state.occupancy_all & !single(capture_pawn);
            let rays = pseudo_moves(
                self.state,
                PieceKind::Rook,
                self.my_color,
                self.king,
                occupancy,
            );
            let side = if self.king < capturer {
                right_of(square_file(self.king))
            } else {
                left_of(square_file(self.king))
            };
            self.enter_moves(
                capturer,
                PieceKind::Pawn,
                single(en_passant_square) & rays & side,
            );
        } else {
            for start in squares(electable_pawns) {
                let ends = if self.pins & single(start) != 0 {
                    single(en_passant_square) & self.pin_rays[start as usize]
                } else {
                    single(en_passant_square)
                };
                self.enter_moves(start, PieceKind::Pawn, ends);
            }
        }
    }

    fn plain_king_moves(&mut self) {
        let without_king = self.state.occupancy_all & !single(self.king);
        let ends = pseudo_moves(
            self.state,
            PieceKind::King,
            self.my_color,
            self.king,
            self.state.occupancy_all,
        );

        for end in squares(ends) {
            if !is_square_attacked(self.state, end, self.my_color, without_king) {
                self.moves.push(Move::plain(self.king, end));
            }
        }
    }

    fn enter_moves(&mut self, start: Square, piece: PieceKind, ends: BitBoard) {
        let promotion_rank = match self.my_color {
            Color::Light => 7,
            Color::Dark => 0,
        };

        for end in squares(ends & self.targets) {
            if piece == PieceKind::Pawn && square_rank(end) == promotion_rank {
                for promotion in [
                    PieceKind::Knight,
                    PieceKind::Bishop,
                    PieceKind::Rook,
                    PieceKind::Queen,
                ] {
                    self.moves.push(Move::promoting(start, end, promotion));
                }
            } else {
                self.moves.push(Move::plain(start, end));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_legal_moves;
    use crate::game_state::chess_types::GameState;
    use crate::moves::chess_move::Move;

    fn legal(fen: &str) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves = generate_legal_moves(&game);
        moves.sort();
        moves
    }

    fn assert_moves(fen: &str, expected: &[&str]) {
        let mut expected: Vec<Move> = expected
            .iter()
            .map(|text| Move::from_long_algebraic(text).expect("expected move should parse"))
            .collect();
        expected.sort();
        assert_eq!(legal(fen), expected, "wrong legal moves for {fen}");
    }

    fn contains(moves: &[Move], text: &str) -> bool {
        let mv = Move::from_long_algebraic(text).expect("probe move should parse");
        moves.contains(&mv)
    }

    #[test]
    fn twenty_legal_moves_in_the_starting_position() {
        let game = GameState::new_game();
        assert_eq!(generate_legal_moves(&game).len(), 20);
    }

    #[test]
    fn pinned_knight_cannot_move() {
        assert_moves("8/8/8/8/8/8/8/K2N2r1 w - - 0 1", &["a1a2", "a1b2", "a1b1"]);
    }

    #[test]
    fn pinned_rook_can_capture_its_pinner() {
        assert_moves("8/8/8/8/8/k7/8/K1Rr4 w - - 0 1", &["a1b1", "c1b1", "c1d1"]);
    }

    #[test]
    fn stalemate_has_no_moves() {
        assert_moves("8/8/8/8/8/1qk5/8/K7 w - - 0 1", &[]);
    }

    #[test]
    fn checkmate_has_no_moves() {
        assert_moves("8/8/8/8/8/2k5/1q6/K7 w - - 0 1", &[]);
    }

    #[test]
    fn double_check_only_allows_king_moves() {
        assert_moves("8/7k/8/8/8/1n2Q3/8/K3r3 w - - 0 1", &["a1a2", "a1b2"]);
    }

    #[test]
    fn double_check_by_two_knights_is_recognized() {
        assert_moves(
            "8/7k/8/8/8/1nQ5/2n5/K7 w - - 0 1",
            &["a1a2", "a1b2", "a1b1"],
        );
    }

    #[test]
    fn double_check_by_two_rooks_is_recognized() {
        assert_moves("8/7k/8/8/8/r1Q5/8/K1r5 w - - 0 1", &["a1b2"]);
    }

    #[test]
    fn single_check_is_solved_by_capture_or_interception() {
        assert_moves("8/8/8/8/4Q3/k7/8/K3r3 w - - 0 1", &["e4b1", "e4e1"]);
    }

    #[test]
    fn both_castles_are_generated() {
        let moves = legal("8/8/8/8/8/4k3/8/R3K2R w KQ - 0 1");
        assert!(contains(&moves, "e1c1"));
        assert!(contains(&moves, "e1g1"));
        assert!(contains(&moves, "e1d1"));
        assert!(contains(&moves, "e1f1"));
        assert_eq!(moves.len(), 23);
    }

    #[test]
    fn no_castling_without_the_rights() {
        let moves = legal("8/8/8/8/8/4k3/8/R3K2R w - - 0 1");
        assert!(!contains(&moves, "e1c1"));
        assert!(!contains(&moves, "e1g1"));
        assert!(contains(&moves, "e1d1"));
        assert!(contains(&moves, "e1f1"));
    }

    #[test]
    fn no_castling_through_an_attacked_square() {
        // The rook on d2 covers d1: the king may neither step there nor
        // castle across it, while the king side stays available.
        let moves = legal("8/8/8/8/8/4k3/3r4/R3K2R w KQ - 0 1");
        assert!(!contains(&moves, "e1c1"));
        assert!(!contains(&moves, "e1d1"));
        assert!(contains(&moves, "e1g1"));
        assert!(contains(&moves, "e1f1"));
    }

    #[test]
    fn no_castling_while_in_check() {
        assert_moves("8/8/8/8/8/4k3/4r3/R3K2R w KQ - 0 1", &["e1f1", "e1d1"]);
    }

    #[test]
    fn no_castling_into_check() {
        let moves = legal("8/8/8/6r1/8/4k3/8/R3K2R w KQ - 0 1");
        assert!(!contains(&moves, "e1g1"));
        assert!(contains(&moves, "e1c1"));
        assert!(contains(&moves, "e1d1"));
        assert!(contains(&moves, "e1f1"));
    }

    #[test]
    fn simple_en_passant_capture_is_legal() {
        assert_moves(
            "4k3/8/8/3pP3/8/8/2q5/4K3 w - d6 0 1",
            &["e1f1", "e5e6", "e5d6"],
        );
    }

    #[test]
    fn en_passant_exposing_the_king_along_the_rank_is_suppressed() {
        assert_moves(
            "8/8/8/K1pP3q/8/8/8/8 w - c6 0 1",
            &["d5d6", "a5a6", "a5b6", "a5b5", "a5a4"],
        );
    }

    #[test]
    fn en_passant_can_resolve_a_pawn_check() {
        // The double-pushed pawn gives check; capturing it en passant is the
        // only non-king answer.
        assert_moves(
            "8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1",
            &[
                "e4d3", "c5b4", "c5b5", "c5b6", "c5c6", "c5d6", "c5c4", "c5d5", "c5d4",
            ],
        );
    }

    #[test]
    fn pinned_pawn_may_not_capture_en_passant_off_its_ray() {
        // The e5 pawn is pinned along h8-c3; d6 leaves the diagonal.
        assert_moves(
            "k6b/8/8/3pP3/8/2K5/8/8 w - d6 0 1",
            &["c3b2", "c3b3", "c3b4", "c3c2", "c3d2", "c3d3", "c3d4"],
        );
    }

    #[test]
    fn pinned_pawn_may_capture_en_passant_along_its_ray() {
        // Same pin, but the capture square f6 lies on the diagonal.
        assert_moves(
            "k6b/8/8/4Pp2/8/2K5/8/8 w - f6 0 1",
            &[
                "e5f6", "c3b2", "c3b3", "c3b4", "c3c2", "c3c4", "c3d2", "c3d3", "c3d4",
            ],
        );
    }

    #[test]
    fn promotions_expand_to_four_moves() {
        assert_moves(
            "8/P7/8/8/8/8/8/k6K w - - 0 1",
            &["a7a8n", "a7a8b", "a7a8r", "a7a8q", "h1g1", "h1g2", "h1h2"],
        );
    }

    #[test]
    fn every_legal_move_leaves_the_king_safe() {
        use crate::move_generation::legal_move_apply::{apply_move, undo_move};
        use crate::move_generation::legal_move_checks::is_king_in_check;

        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let mover = game.side_to_move;
            for mv in generate_legal_moves(&game.clone()) {
                apply_move(&mut game, mv).expect("legal move should apply");
                assert!(
                    !is_king_in_check(&game, mover),
                    "move {mv} leaves the king in check in {fen}"
                );
                undo_move(&mut game).expect("undo should succeed");
            }
        }
    }
}
