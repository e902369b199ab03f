//! Tests for seat assignment and release.

use strictly_chess::Side;
use strictly_relay::{ConnectionId, Role, SessionRegistry};

#[test]
fn test_seats_fill_in_arrival_order() {
    let mut registry = SessionRegistry::new();
    assert_eq!(registry.assign(ConnectionId(1)), Role::White);
    assert_eq!(registry.assign(ConnectionId(2)), Role::Black);
    assert_eq!(registry.assign(ConnectionId(3)), Role::Observer);
    assert_eq!(registry.assign(ConnectionId(4)), Role::Observer);

    assert_eq!(registry.occupant(Side::White), Some(ConnectionId(1)));
    assert_eq!(registry.occupant(Side::Black), Some(ConnectionId(2)));
    assert_eq!(registry.observer_count(), 2);
}

#[test]
fn test_reassigning_a_known_connection_keeps_its_role() {
    let mut registry = SessionRegistry::new();
    registry.assign(ConnectionId(1));
    assert_eq!(registry.assign(ConnectionId(1)), Role::White);
    assert_eq!(registry.assign(ConnectionId(2)), Role::Black);
}

#[test]
fn test_released_seat_goes_to_next_connection() {
    let mut registry = SessionRegistry::new();
    registry.assign(ConnectionId(1));
    registry.assign(ConnectionId(2));
    registry.assign(ConnectionId(3));

    registry.release(ConnectionId(1));
    assert_eq!(registry.occupant(Side::White), None);
    assert_eq!(registry.role_of(ConnectionId(1)), None);

    // Existing observers are not promoted; the next arrival takes the seat.
    assert_eq!(registry.role_of(ConnectionId(3)), Some(Role::Observer));
    assert_eq!(registry.assign(ConnectionId(4)), Role::White);
}

#[test]
fn test_black_vacancy_is_filled_before_observing() {
    let mut registry = SessionRegistry::new();
    registry.assign(ConnectionId(1));
    registry.assign(ConnectionId(2));
    registry.release(ConnectionId(2));
    assert_eq!(registry.assign(ConnectionId(3)), Role::Black);
}

#[test]
fn test_release_of_unknown_or_observer_leaves_seats_alone() {
    let mut registry = SessionRegistry::new();
    registry.assign(ConnectionId(1));
    registry.assign(ConnectionId(2));
    registry.assign(ConnectionId(3));

    registry.release(ConnectionId(99));
    registry.release(ConnectionId(3));

    assert_eq!(registry.occupant(Side::White), Some(ConnectionId(1)));
    assert_eq!(registry.occupant(Side::Black), Some(ConnectionId(2)));
    assert_eq!(registry.observer_count(), 0);
}

#[test]
fn test_at_most_one_holder_per_seat_under_churn() {
    let mut registry = SessionRegistry::new();
    let mut connected: Vec<ConnectionId> = Vec::new();
    let mut seed: u64 = 0x5eed;

    for next in 1..=500u64 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        if connected.is_empty() || seed % 3 != 0 {
            let id = ConnectionId(next);
            registry.assign(id);
            connected.push(id);
        } else {
            let index = (seed >> 33) as usize % connected.len();
            registry.release(connected.swap_remove(index));
        }

        let whites = connected
            .iter()
            .filter(|id| registry.role_of(**id) == Some(Role::White))
            .count();
        let blacks = connected
            .iter()
            .filter(|id| registry.role_of(**id) == Some(Role::Black))
            .count();
        assert!(whites <= 1, "{} white holders after step {}", whites, next);
        assert!(blacks <= 1, "{} black holders after step {}", blacks, next);

        // Seat holders are always live connections.
        for side in [Side::White, Side::Black] {
            if let Some(holder) = registry.occupant(side) {
                assert!(connected.contains(&holder));
            }
        }
    }
}

#[test]
fn test_role_text_and_side() {
    assert_eq!(Role::Observer.to_string(), "observer");
    assert_eq!("black".parse::<Role>().unwrap(), Role::Black);
    assert_eq!(Role::White.side(), Some(Side::White));
    assert_eq!(Role::Observer.side(), None);
    assert!(!Role::Observer.is_player());
    assert_eq!(Role::from(Side::Black), Role::Black);
}
