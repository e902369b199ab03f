//! Session registry: which connection holds which seat at the table.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strictly_chess::Side;
use tracing::{debug, info, instrument};

/// Process-local identity of one client connection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("conn-{}", _0)]
pub struct ConnectionId(pub u64);

/// A connection's designation at the table.
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
pub enum Role {
    /// Plays white, moves first.
    White,
    /// Plays black, moves second.
    Black,
    /// Watches without moving.
    Observer,
}

impl Role {
    /// The side this role plays, if it plays at all.
    pub fn side(self) -> Option<Side> {
        match self {
            Role::White => Some(Side::White),
            Role::Black => Some(Side::Black),
            Role::Observer => None,
        }
    }

    /// Returns true for the two playing roles.
    pub fn is_player(self) -> bool {
        self.side().is_some()
    }
}

impl From<Side> for Role {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Role::White,
            Side::Black => Role::Black,
        }
    }
}

/// Maps the two playing seats to the connections occupying them.
///
/// A vacant seat is `None` and is handed to the next connection that
/// asks. A connection occupies at most one seat.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    white: Option<ConnectionId>,
    black: Option<ConnectionId>,
    observers: HashSet<ConnectionId>,
}

impl SessionRegistry {
    /// Creates a registry with both seats vacant.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self::default()
    }

    /// Seats a connection: white if vacant, else black if vacant, else observer.
    ///
    /// Asking again for a connection that is already known returns its
    /// current role without consuming another seat.
    #[instrument(skip(self))]
    pub fn assign(&mut self, connection: ConnectionId) -> Role {
        if let Some(role) = self.role_of(connection) {
            debug!(%role, "Connection already seated");
            return role;
        }

        let role = if self.white.is_none() {
            self.white = Some(connection);
            Role::White
        } else if self.black.is_none() {
            self.black = Some(connection);
            Role::Black
        } else {
            self.observers.insert(connection);
            Role::Observer
        };

        info!(%role, "Assigned role");
        role
    }

    /// Frees whatever the connection holds. Unknown connections are ignored.
    #[instrument(skip(self))]
    pub fn release(&mut self, connection: ConnectionId) {
        if self.white == Some(connection) {
            self.white = None;
            info!("White seat vacated");
        } else if self.black == Some(connection) {
            self.black = None;
            info!("Black seat vacated");
        } else if self.observers.remove(&connection) {
            debug!("Observer left");
        } else {
            debug!("Release for unknown connection ignored");
        }
    }

    /// Role of the connection, or `None` if the registry has never seen it.
    pub fn role_of(&self, connection: ConnectionId) -> Option<Role> {
        if self.white == Some(connection) {
            Some(Role::White)
        } else if self.black == Some(connection) {
            Some(Role::Black)
        } else if self.observers.contains(&connection) {
            Some(Role::Observer)
        } else {
            None
        }
    }

    /// Connection occupying the given side's seat.
    pub fn occupant(&self, side: Side) -> Option<ConnectionId> {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// Number of connected observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
