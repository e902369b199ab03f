//! Wire events exchanged over the table's WebSocket.
//!
//! Every frame is a JSON object tagged with `event`, with the payload (if
//! any) under `data`:
//!
//! ```json
//! {"event": "role-assignment", "data": "white"}
//! {"event": "observer-notice"}
//! {"event": "move-submit", "data": {"from": "e2", "to": "e4"}}
//! ```

use serde::{Deserialize, Serialize};
use strictly_chess::{AppliedMove, MoveIntent, Side};

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// You hold a playing seat.
    RoleAssignment(Side),

    /// Both seats are taken; you are watching.
    ObserverNotice,

    /// Full position as FEN.
    StateSnapshot(String),

    /// A move was played at the table.
    MoveApplied(AppliedMove),

    /// The rules engine refused your move.
    MoveRejected {
        /// The intent exactly as submitted.
        intent: MoveIntent,
        /// Engine's explanation.
        reason: String,
    },

    /// You may not move right now.
    TurnRejected(String),

    /// Your last frame could not be understood.
    ProtocolError(String),
}

/// Events clients send to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Attempt a move.
    MoveSubmit(MoveIntent),
}
