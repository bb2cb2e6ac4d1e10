//! The move record and its long-algebraic text form.

use std::fmt;

use crate::errors::ChessError;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// A move as start square, end square, and an optional promotion piece.
/// Castles use the canonical two-square king move; equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Move {
    pub start: Square,
    pub end: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn plain(start: Square, end: Square) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(start: Square, end: Square, promotion: PieceKind) -> Self {
        Self {
            start,
            end,
            promotion: Some(promotion),
        }
    }

    /// Parse long algebraic notation: four coordinate characters plus an
    /// optional promotion letter (`nbrq`).
    pub fn from_long_algebraic(text: &str) -> Result<Self, ChessError> {
        if text.len() != 4 && text.len() != 5 {
            return Err(ChessError::InvalidMove(format!(
                "expected 4 or 5 characters, got {text:?}"
            )));
        }

        let start = algebraic_to_square(&text[0..2])?;
        let end = algebraic_to_square(&text[2..4])?;
        let promotion = match text.as_bytes().get(4) {
            None => None,
            Some(letter) => Some(promotion_from_char(*letter as char)?),
        };

        Ok(Self {
            start,
            end,
            promotion,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = square_to_algebraic(self.start).map_err(|_| fmt::Error)?;
        let end = square_to_algebraic(self.end).map_err(|_| fmt::Error)?;
        write!(f, "{start}{end}")?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion_to_char(promotion))?;
        }
        Ok(())
    }
}

fn promotion_from_char(letter: char) -> Result<PieceKind, ChessError> {
    match letter.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::InvalidMove(format!(
            "unknown promotion piece {letter:?}"
        ))),
    }
}

fn promotion_to_char(piece: PieceKind) -> char {
    match piece {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        _ => '?',
    }
}
