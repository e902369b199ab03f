//! Rules engine boundary and its shakmaty-backed implementation.

use crate::{AppliedMove, ChessError, GameStatus, MoveIntent, Side};
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Role, Square};
use tracing::{debug, info, instrument, warn};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The narrow interface the table server needs from a chess rules engine.
///
/// The server never touches the board directly. It asks whose turn it is,
/// hands over intents it has already authorized, and reads back a
/// serialized snapshot. Any type implementing this can stand in for the
/// real engine, which is how the server's tests observe engine calls.
pub trait RulesEngine: Send {
    /// Side to move in the current position.
    fn current_turn(&self) -> Side;

    /// Validates and, if legal, plays the move.
    ///
    /// On `Err` the position is unchanged.
    fn attempt(&mut self, intent: &MoveIntent) -> Result<AppliedMove, ChessError>;

    /// Serializes the current position as FEN.
    fn snapshot(&self) -> String;

    /// Replaces the current position with the one described by `fen`.
    ///
    /// On `Err` the position is unchanged.
    fn load(&mut self, fen: &str) -> Result<(), ChessError>;
}

/// Standard chess rules backed by shakmaty.
#[derive(Debug, Clone, Default)]
pub struct ChessEngine {
    position: Chess,
}

impl ChessEngine {
    /// Creates an engine at the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating chess engine at starting position");
        Self::default()
    }

    /// Creates an engine at the position described by `fen`.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut engine = Self::new();
        engine.load(fen)?;
        Ok(engine)
    }

    /// Resolves an intent to a legal shakmaty move.
    ///
    /// A pawn move onto the last rank without a promotion letter is
    /// promoted to a queen.
    fn resolve(&self, intent: &MoveIntent) -> Result<Move, ChessError> {
        let from = parse_square(intent, &intent.from)?;
        let to = parse_square(intent, &intent.to)?;
        let promotion = intent
            .promotion
            .as_deref()
            .map(|text| parse_promotion(intent, text))
            .transpose()?;

        let uci = UciMove::Normal {
            from,
            to,
            promotion,
        };
        match uci.to_move(&self.position) {
            Ok(m) => Ok(m),
            Err(_) if promotion.is_none() => UciMove::Normal {
                from,
                to,
                promotion: Some(Role::Queen),
            }
            .to_move(&self.position)
            .map_err(|_| ChessError::IllegalMove(intent.clone())),
            Err(_) => Err(ChessError::IllegalMove(intent.clone())),
        }
    }
}

impl RulesEngine for ChessEngine {
    fn current_turn(&self) -> Side {
        self.position.turn().into()
    }

    #[instrument(skip(self, intent), fields(intent = %intent, turn = %self.current_turn()))]
    fn attempt(&mut self, intent: &MoveIntent) -> Result<AppliedMove, ChessError> {
        let m = self.resolve(intent).inspect_err(|e| {
            warn!(error = %e, "Engine refused move");
        })?;

        let side = self.current_turn();
        let san = San::from_move(&self.position, &m).to_string();
        let promotion = m.promotion().map(|role| role.char().to_string());
        let (from, to) = match m.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, .. } => (from.to_string(), to.to_string()),
            _ => (
                intent.from.trim().to_ascii_lowercase(),
                intent.to.trim().to_ascii_lowercase(),
            ),
        };

        self.position = self
            .position
            .clone()
            .play(&m)
            .map_err(|_| ChessError::IllegalMove(intent.clone()))?;

        let status = status_of(&self.position);
        info!(%side, %san, %status, "Move played");

        Ok(AppliedMove::new(side, from, to, promotion, san, status))
    }

    fn snapshot(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    #[instrument(skip(self))]
    fn load(&mut self, fen: &str) -> Result<(), ChessError> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| ChessError::InvalidFen(format!("{}: {}", fen, e)))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| ChessError::InvalidFen(format!("{}: {}", fen, e)))?;

        self.position = position;
        info!(turn = %self.current_turn(), "Position loaded");
        Ok(())
    }
}

fn status_of(position: &Chess) -> GameStatus {
    if position.is_checkmate() {
        GameStatus::Checkmate
    } else if position.is_stalemate() {
        GameStatus::Stalemate
    } else if position.is_insufficient_material() {
        GameStatus::InsufficientMaterial
    } else if position.is_check() {
        GameStatus::Check
    } else {
        GameStatus::InProgress
    }
}

fn parse_square(intent: &MoveIntent, text: &str) -> Result<Square, ChessError> {
    text.trim()
        .to_ascii_lowercase()
        .parse::<Square>()
        .map_err(|_| {
            ChessError::MalformedIntent(intent.clone(), format!("bad square {:?}", text))
        })
}

fn parse_promotion(intent: &MoveIntent, text: &str) -> Result<Role, ChessError> {
    let mut chars = text.trim().chars();
    let role = match (chars.next(), chars.next()) {
        (Some(c), None) => Role::from_char(c.to_ascii_lowercase()),
        _ => None,
    };
    match role {
        Some(role @ (Role::Knight | Role::Bishop | Role::Rook | Role::Queen)) => Ok(role),
        _ => Err(ChessError::MalformedIntent(
            intent.clone(),
            format!("bad promotion {:?}", text),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square_accepts_uppercase_and_whitespace() {
        let intent = MoveIntent::new(" E2", "e4 ");
        assert_eq!(parse_square(&intent, &intent.from).unwrap(), Square::E2);
        assert_eq!(parse_square(&intent, &intent.to).unwrap(), Square::E4);
    }

    #[test]
    fn test_parse_square_rejects_off_board() {
        let intent = MoveIntent::new("i9", "e4");
        let err = parse_square(&intent, &intent.from).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_promotion_rejects_king_and_pawn() {
        let intent = MoveIntent::new("a7", "a8");
        assert!(parse_promotion(&intent, "k").is_err());
        assert!(parse_promotion(&intent, "p").is_err());
        assert!(parse_promotion(&intent, "queen").is_err());
        assert_eq!(parse_promotion(&intent, "N").unwrap(), Role::Knight);
    }

    #[test]
    fn test_status_of_starting_position() {
        assert_eq!(status_of(&Chess::default()), GameStatus::InProgress);
    }
}
