//! Strictly Chess - the rules boundary for the strictly_relay table server.
//!
//! The table server treats chess rules as a black box. This crate defines
//! that box: the [`RulesEngine`] trait with its four operations, the value
//! types that cross it, and [`ChessEngine`], the standard-rules
//! implementation backed by shakmaty.
//!
//! # Example
//!
//! ```
//! use strictly_chess::{ChessEngine, MoveIntent, RulesEngine, Side};
//!
//! let mut engine = ChessEngine::new();
//! assert_eq!(engine.current_turn(), Side::White);
//!
//! let applied = engine.attempt(&MoveIntent::new("e2", "e4")).unwrap();
//! assert_eq!(applied.san, "e4");
//! assert_eq!(engine.current_turn(), Side::Black);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod types;

pub use engine::{ChessEngine, RulesEngine, STARTING_FEN};
pub use error::ChessError;
pub use types::{AppliedMove, GameStatus, MoveIntent, Side};
