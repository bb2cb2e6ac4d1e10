//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores piece
//! bitboards, occupancy caches, turn/state flags, the uneventful half-move
//! clock, and the undo journal used by make/unmake workflows.

use crate::bitboard::single;
use crate::errors::ChessError;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Make/unmake journal ---
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_bb(&self, color: Color, piece: PieceKind) -> u64 {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn color_bb(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    /// Place `piece` of `color` on `square`. The square must be empty.
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: PieceKind, color: Color) {
        let mask = single(square);
        self.pieces[color.index()][piece.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    /// Remove whatever occupies `square`. A no-op on an empty square.
    #[inline]
    pub fn clear_square(&mut self, square: Square) {
        let keep = !single(square);
        for color_boards in self.pieces.iter_mut() {
            for board in color_boards.iter_mut() {
                *board &= keep;
            }
        }
        self.occupancy_by_color[0] &= keep;
        self.occupancy_by_color[1] &= keep;
        self.occupancy_all &= keep;
    }

    /// Identify the piece on `square`, if any.
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = single(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in [Color::Light, Color::Dark] {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for piece in ALL_PIECE_KINDS {
                if self.pieces[color.index()][piece.index()] & mask != 0 {
                    return Some((color, piece));
                }
            }
        }

        None
    }
}
