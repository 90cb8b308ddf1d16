//! Notation and replay error types

use thiserror::Error;

use crate::types::{PieceKind, Square};

/// Failure to apply a single SAN token to a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("cannot decompose SAN token")]
    Unparsable,

    #[error("no {piece} of the side to move can reach {dest}")]
    NoOriginFound { piece: PieceKind, dest: Square },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("PGN contains no movetext")]
    NoMovetext,

    #[error("unparsable move {san:?} at index {index}")]
    UnparsableToken { index: usize, san: String },

    #[error("no origin square for move {san:?} at index {index}")]
    NoOriginFound { index: usize, san: String },
}

impl NotationError {
    /// Attach the replay position to a token-level failure.
    pub fn at_move(err: SanError, index: usize, san: &str) -> Self {
        let san = san.to_string();
        match err {
            SanError::Unparsable => NotationError::UnparsableToken { index, san },
            SanError::NoOriginFound { .. } => NotationError::NoOriginFound { index, san },
        }
    }

    /// Index of the offending move, if the error concerns one.
    pub fn move_index(&self) -> Option<usize> {
        match self {
            NotationError::NoMovetext => None,
            NotationError::UnparsableToken { index, .. }
            | NotationError::NoOriginFound { index, .. } => Some(*index),
        }
    }
}
