//! Core domain types shared between the rules engine and the table server.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// One of the two playing sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// White (moves first).
    White,
    /// Black (moves second).
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<shakmaty::Color> for Side {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Side::White,
            shakmaty::Color::Black => Side::Black,
        }
    }
}

impl From<Side> for shakmaty::Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => shakmaty::Color::White,
            Side::Black => shakmaty::Color::Black,
        }
    }
}

/// A move as submitted by a client, before any validation.
///
/// Squares are algebraic (`"e2"`), the optional promotion is a piece
/// letter (`"q"`). Nothing here is trusted until the engine accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Source square.
    pub from: String,
    /// Destination square.
    pub to: String,
    /// Promotion piece letter, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl MoveIntent {
    /// Creates an intent without a promotion piece.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            promotion: None,
        }
    }

    /// Sets the promotion piece letter.
    pub fn with_promotion(mut self, piece: impl Into<String>) -> Self {
        self.promotion = Some(piece.into());
        self
    }
}

impl std::fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = &self.promotion {
            write!(f, "={}", piece)?;
        }
        Ok(())
    }
}

/// Position status after a move has been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameStatus {
    /// Play continues normally.
    InProgress,
    /// The side to move is in check.
    Check,
    /// The side to move has been mated.
    Checkmate,
    /// The side to move has no legal moves and is not in check.
    Stalemate,
    /// Neither side can mate.
    InsufficientMaterial,
}

impl GameStatus {
    /// Returns true when no further moves can be played.
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::InsufficientMaterial
        )
    }
}

/// Authoritative record of a move the engine accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct AppliedMove {
    /// Side that moved.
    pub side: Side,
    /// Source square.
    pub from: String,
    /// Destination square.
    pub to: String,
    /// Promotion piece letter, if the move promoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    /// Standard algebraic notation.
    pub san: String,
    /// Status of the position after the move.
    pub status: GameStatus,
}
