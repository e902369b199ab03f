//! Broadcast coordinator: delivers server events to one or all connections.
//!
//! Each connection is represented by the sending half of an unbounded
//! channel. The socket task owns the receiving half and writes frames to
//! the wire, so publishing never waits on a slow client.

use crate::protocol::ServerEvent;
use crate::registry::ConnectionId;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

/// Sending half of a connection's outbound queue.
pub type Outbox = mpsc::UnboundedSender<ServerEvent>;

/// Fan-out table of connected outboxes.
#[derive(Debug, Default)]
pub struct Broadcaster {
    outboxes: BTreeMap<ConnectionId, Outbox>,
}

impl Broadcaster {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection's outbox.
    #[instrument(skip(self, outbox))]
    pub fn attach(&mut self, connection: ConnectionId, outbox: Outbox) {
        self.outboxes.insert(connection, outbox);
        debug!(connections = self.outboxes.len(), "Outbox attached");
    }

    /// Removes a connection's outbox.
    #[instrument(skip(self))]
    pub fn detach(&mut self, connection: ConnectionId) {
        self.outboxes.remove(&connection);
        debug!(connections = self.outboxes.len(), "Outbox detached");
    }

    /// Sends to one connection. Returns false if it could not be delivered.
    #[instrument(skip(self, event))]
    pub fn send_to(&self, connection: ConnectionId, event: ServerEvent) -> bool {
        let Some(outbox) = self.outboxes.get(&connection) else {
            warn!("No outbox for connection");
            return false;
        };
        if outbox.send(event).is_err() {
            warn!("Outbox closed, event dropped");
            return false;
        }
        true
    }

    /// Sends to every attached connection.
    ///
    /// A closed outbox is skipped; the rest still receive the event.
    /// Returns the number of successful deliveries.
    #[instrument(skip(self, event))]
    pub fn publish(&self, event: ServerEvent) -> usize {
        let mut delivered = 0;
        for (connection, outbox) in &self.outboxes {
            if outbox.send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                warn!(%connection, "Outbox closed, skipping");
            }
        }
        debug!(delivered, total = self.outboxes.len(), "Published event");
        delivered
    }

    /// Number of attached connections.
    pub fn len(&self) -> usize {
        self.outboxes.len()
    }

    /// Returns true when nobody is attached.
    pub fn is_empty(&self) -> bool {
        self.outboxes.is_empty()
    }
}
