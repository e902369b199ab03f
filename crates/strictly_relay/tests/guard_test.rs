//! Tests for turn authorization.

use strictly_chess::Side;
use strictly_relay::{AuthorizationError, ConnectionId, SessionRegistry, authorize};

fn seated() -> SessionRegistry {
    let mut registry = SessionRegistry::new();
    registry.assign(ConnectionId(1));
    registry.assign(ConnectionId(2));
    registry.assign(ConnectionId(3));
    registry
}

#[test]
fn test_player_on_move_is_authorized() {
    let registry = seated();
    assert_eq!(authorize(&registry, ConnectionId(1), Side::White), Ok(Side::White));
    assert_eq!(authorize(&registry, ConnectionId(2), Side::Black), Ok(Side::Black));
}

#[test]
fn test_player_off_move_is_rejected() {
    let registry = seated();
    assert_eq!(
        authorize(&registry, ConnectionId(2), Side::White),
        Err(AuthorizationError::NotYourTurn)
    );
    assert_eq!(
        authorize(&registry, ConnectionId(1), Side::Black),
        Err(AuthorizationError::NotYourTurn)
    );
}

#[test]
fn test_observer_is_never_authorized() {
    let registry = seated();
    for turn in [Side::White, Side::Black] {
        assert_eq!(
            authorize(&registry, ConnectionId(3), turn),
            Err(AuthorizationError::NotAPlayer)
        );
    }
}

#[test]
fn test_unknown_connection_is_not_a_player() {
    let registry = seated();
    assert_eq!(
        authorize(&registry, ConnectionId(42), Side::White),
        Err(AuthorizationError::NotAPlayer)
    );
}

#[test]
fn test_vacated_seat_no_longer_authorizes_former_holder() {
    let mut registry = seated();
    registry.release(ConnectionId(1));
    assert_eq!(
        authorize(&registry, ConnectionId(1), Side::White),
        Err(AuthorizationError::NotAPlayer)
    );
}

#[test]
fn test_rejection_reasons() {
    assert_eq!(AuthorizationError::NotAPlayer.to_string(), "not a player");
    assert_eq!(AuthorizationError::NotYourTurn.to_string(), "not your turn");
}
