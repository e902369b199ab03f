//! Strictly Relay - one chess table, two seats, any number of observers.
//!
//! The server keeps the only authoritative game. Clients connect over a
//! WebSocket and are seated in arrival order: the first free seat is
//! white, the next black, everyone after that watches. Moves pass the
//! turn guard before the rules engine ever sees them, and every accepted
//! move is broadcast to all connections so their mirrors converge.
//!
//! # Architecture
//!
//! - **Registry**: which connection holds which seat
//! - **Guard**: may this connection move now?
//! - **Broadcaster**: deliver events to one connection or all of them
//! - **Lifecycle**: seat on connect, free the seat on disconnect
//! - **Pipeline**: authorize, validate, apply, broadcast
//! - **Server**: axum routes for the page, its assets and `/ws`
//!
//! # Example
//!
//! ```
//! use strictly_chess::{ChessEngine, MoveIntent, Side};
//! use strictly_relay::{MoveOutcome, Role, ServerEvent, Table};
//! use tokio::sync::mpsc;
//!
//! let mut table = Table::new(ChessEngine::new());
//! let (white_tx, mut white_rx) = mpsc::unbounded_channel();
//! let (white, _) = table.connect(white_tx);
//! assert_eq!(table.registry().role_of(white), Some(Role::White));
//! assert_eq!(white_rx.try_recv().unwrap(), ServerEvent::RoleAssignment(Side::White));
//!
//! let outcome = table.submit_move(white, MoveIntent::new("e2", "e4"));
//! assert!(matches!(outcome, MoveOutcome::Applied(_)));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod broadcast;
mod cli;
mod config;
mod guard;
mod lifecycle;
mod pipeline;
mod protocol;
mod registry;
mod server;
mod table;

// Crate-level exports - Seats and authorization
pub use guard::{AuthorizationError, authorize};
pub use registry::{ConnectionId, Role, SessionRegistry};

// Crate-level exports - Delivery
pub use broadcast::{Broadcaster, Outbox};
pub use protocol::{ClientEvent, ServerEvent};

// Crate-level exports - Table and move processing
pub use lifecycle::ConnectionState;
pub use pipeline::MoveOutcome;
pub use table::{SharedTable, Table};

// Crate-level exports - Configuration and serving
pub use cli::Cli;
pub use config::{ConfigError, PORT_ENV, ServerConfig};
pub use server::{dispatch_frame, router, serve};
