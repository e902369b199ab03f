//! Error types for the rules boundary.

use crate::MoveIntent;

/// Reason the rules engine refused a move or a position.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ChessError {
    /// The intent could not be parsed into squares and pieces at all.
    #[display("Malformed move {}: {}", _0, _1)]
    MalformedIntent(MoveIntent, String),

    /// The intent parsed but is not legal in the current position.
    #[display("Illegal move {}", _0)]
    IllegalMove(MoveIntent),

    /// A FEN string could not be parsed or describes an impossible position.
    #[display("Invalid FEN: {}", _0)]
    InvalidFen(String),
}

impl std::error::Error for ChessError {}

impl ChessError {
    /// Returns true for intents the engine could not even parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ChessError::MalformedIntent(..))
    }
}
