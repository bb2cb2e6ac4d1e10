//! Conversions between algebraic coordinates and squares/bitboards.

use crate::bitboard::{single, BitBoard};
use crate::errors::ChessError;
use crate::game_state::chess_types::Square;

/// Convert an algebraic coordinate (for example "e4") to a square index.
#[inline]
pub fn algebraic_to_square(text: &str) -> Result<Square, ChessError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(format!(
            "expected two characters, got {text:?}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidSquare(format!(
            "file out of range: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(format!(
            "rank out of range: {}",
            rank as char
        )));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert an algebraic coordinate to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(text: &str) -> Result<BitBoard, ChessError> {
    Ok(single(algebraic_to_square(text)?))
}

/// Convert a square index (`0..=63`) to its algebraic coordinate.
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, ChessError> {
    if square > 63 {
        return Err(ChessError::InvalidSquare(format!(
            "index out of bounds: {square}"
        )));
    }

    let file = char::from(b'a' + square % 8);
    let rank = char::from(b'1' + square / 8);
    Ok(format!("{file}{rank}"))
}
