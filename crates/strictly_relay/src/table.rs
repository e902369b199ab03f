//! The table: the one authoritative game and everyone connected to it.

use crate::broadcast::{Broadcaster, Outbox};
use crate::lifecycle::ConnectionState;
use crate::pipeline::MoveOutcome;
use crate::protocol::ServerEvent;
use crate::registry::{ConnectionId, SessionRegistry};
use std::sync::Arc;
use strictly_chess::{ChessEngine, MoveIntent, RulesEngine};
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Authoritative state for one game: engine, seats and outboxes.
///
/// All mutation goes through [`Table::connect`], [`Table::disconnect`] and
/// [`Table::submit_move`].
#[derive(Debug)]
pub struct Table<E = ChessEngine> {
    pub(crate) engine: E,
    pub(crate) registry: SessionRegistry,
    pub(crate) broadcaster: Broadcaster,
    next_connection: u64,
}

impl<E: RulesEngine> Table<E> {
    /// Creates a table around an engine, with no one connected.
    #[instrument(skip(engine))]
    pub fn new(engine: E) -> Self {
        info!(turn = %engine.current_turn(), "Opening table");
        Self {
            engine,
            registry: SessionRegistry::new(),
            broadcaster: Broadcaster::new(),
            next_connection: 1,
        }
    }

    /// The rules engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The seat registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Number of connections currently attached.
    pub fn connection_count(&self) -> usize {
        self.broadcaster.len()
    }

    /// Sends an event to a single connection.
    pub fn send_to(&self, connection: ConnectionId, event: ServerEvent) -> bool {
        self.broadcaster.send_to(connection, event)
    }

    pub(crate) fn allocate_connection(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        id
    }
}

/// Cloneable handle to a [`Table`] behind a single mutex.
///
/// Each operation holds the lock for its whole duration, so seat
/// assignment and the move pipeline never interleave.
#[derive(Debug)]
pub struct SharedTable<E = ChessEngine> {
    inner: Arc<Mutex<Table<E>>>,
}

impl<E> Clone for SharedTable<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: RulesEngine> SharedTable<E> {
    /// Wraps a table for shared use.
    pub fn new(table: Table<E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// See [`Table::connect`].
    pub async fn connect(&self, outbox: Outbox) -> (ConnectionId, ConnectionState) {
        self.inner.lock().await.connect(outbox)
    }

    /// See [`Table::disconnect`].
    pub async fn disconnect(&self, connection: ConnectionId) -> ConnectionState {
        self.inner.lock().await.disconnect(connection)
    }

    /// See [`Table::submit_move`].
    pub async fn submit_move(&self, connection: ConnectionId, intent: MoveIntent) -> MoveOutcome {
        self.inner.lock().await.submit_move(connection, intent)
    }

    /// Current position as FEN.
    pub async fn snapshot(&self) -> String {
        self.inner.lock().await.engine.snapshot()
    }

    /// See [`Table::send_to`].
    pub async fn send_to(&self, connection: ConnectionId, event: ServerEvent) -> bool {
        self.inner.lock().await.send_to(connection, event)
    }
}
