//! Turn authorization: may this connection move right now?

use crate::registry::{ConnectionId, SessionRegistry};
use strictly_chess::Side;
use tracing::{debug, instrument, warn};

/// Why a connection was not allowed to submit a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum AuthorizationError {
    /// The connection holds no playing seat.
    #[display("not a player")]
    NotAPlayer,

    /// The connection plays the side that is not on move.
    #[display("not your turn")]
    NotYourTurn,
}

impl std::error::Error for AuthorizationError {}

/// Checks a connection against the side on move.
///
/// Returns the side the connection plays when it may move. The role is
/// resolved from the registry on every call, so a seat vacated by a
/// disconnect no longer authorizes its former holder.
#[instrument(skip(registry))]
pub fn authorize(
    registry: &SessionRegistry,
    connection: ConnectionId,
    turn: Side,
) -> Result<Side, AuthorizationError> {
    let Some(side) = registry.role_of(connection).and_then(|role| role.side()) else {
        warn!("Move from a connection without a seat");
        return Err(AuthorizationError::NotAPlayer);
    };

    if side != turn {
        warn!(%side, "Move out of turn");
        return Err(AuthorizationError::NotYourTurn);
    }

    debug!(%side, "Move authorized");
    Ok(side)
}
