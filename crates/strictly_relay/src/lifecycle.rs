//! Connection lifecycle: seating on connect, freeing seats on disconnect.

use crate::broadcast::Outbox;
use crate::protocol::ServerEvent;
use crate::registry::{ConnectionId, Role};
use crate::table::Table;
use strictly_chess::{RulesEngine, Side};
use tracing::{info, instrument};

/// Where a single connection is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Socket open, no role yet.
    Connecting,
    /// Holding a playing seat.
    ActivePlayer(Side),
    /// Watching.
    ActiveObserver,
    /// Gone; any seat has been released.
    Disconnected,
}

impl ConnectionState {
    /// State after the registry hands out `role`.
    pub fn admitted(role: Role) -> Self {
        match role.side() {
            Some(side) => ConnectionState::ActivePlayer(side),
            None => ConnectionState::ActiveObserver,
        }
    }

    /// Returns true while the connection is seated or watching.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ConnectionState::ActivePlayer(_) | ConnectionState::ActiveObserver
        )
    }
}

impl<E: RulesEngine> Table<E> {
    /// Admits a new connection.
    ///
    /// A player receives `role-assignment`, an observer `observer-notice`.
    /// Both then receive a `state-snapshot` so their mirror starts from the
    /// current position rather than the opening one.
    #[instrument(skip(self, outbox))]
    pub fn connect(&mut self, outbox: Outbox) -> (ConnectionId, ConnectionState) {
        let connection = self.allocate_connection();
        self.broadcaster.attach(connection, outbox);

        let role = self.registry.assign(connection);
        let greeting = match role.side() {
            Some(side) => ServerEvent::RoleAssignment(side),
            None => ServerEvent::ObserverNotice,
        };
        self.broadcaster.send_to(connection, greeting);
        self.broadcaster
            .send_to(connection, ServerEvent::StateSnapshot(self.engine.snapshot()));

        let state = ConnectionState::admitted(role);
        info!(%connection, %role, ?state, "Connection admitted");
        (connection, state)
    }

    /// Removes a connection and frees any seat it held.
    ///
    /// Nobody is told about the vacancy; the seat simply goes to the next
    /// connection.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, connection: ConnectionId) -> ConnectionState {
        let role = self.registry.role_of(connection);
        self.registry.release(connection);
        self.broadcaster.detach(connection);
        info!(?role, "Connection closed");
        if self.broadcaster.is_empty() {
            info!("Table has no connections");
        }
        ConnectionState::Disconnected
    }
}
