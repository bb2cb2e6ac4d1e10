use std::error::Error;
use std::fmt;

/// Errors surfaced by parsing and state mutation. Nothing is recovered
/// internally; every failure is handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    InvalidFen(String),
    InvalidSquare(String),
    InvalidMove(String),
    EmptyUndoStack,
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessError::InvalidSquare(msg) => write!(f, "invalid square: {msg}"),
            ChessError::InvalidMove(msg) => write!(f, "invalid move: {msg}"),
            ChessError::EmptyUndoStack => write!(f, "no move available to undo"),
        }
    }
}

impl Error for ChessError {}
