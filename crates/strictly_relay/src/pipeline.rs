//! Move processing: authorize, validate, apply, broadcast.

use crate::guard::{AuthorizationError, authorize};
use crate::protocol::ServerEvent;
use crate::registry::ConnectionId;
use crate::table::Table;
use strictly_chess::{AppliedMove, ChessError, MoveIntent, RulesEngine};
use tracing::{info, instrument, warn};

/// What happened to a submitted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Played and broadcast to everyone.
    Applied(AppliedMove),
    /// Stopped by the turn guard; the engine was never consulted.
    Unauthorized(AuthorizationError),
    /// Refused by the rules engine.
    Refused(ChessError),
}

impl<E: RulesEngine> Table<E> {
    /// Runs one move through the pipeline.
    ///
    /// Rejections go only to the submitting connection and leave the
    /// position untouched. A successful move is followed by `move-applied`
    /// and a fresh `state-snapshot` to every connection, mover included.
    #[instrument(skip(self, intent), fields(intent = %intent))]
    pub fn submit_move(&mut self, connection: ConnectionId, intent: MoveIntent) -> MoveOutcome {
        let turn = self.engine.current_turn();

        if let Err(reason) = authorize(&self.registry, connection, turn) {
            self.broadcaster
                .send_to(connection, ServerEvent::TurnRejected(reason.to_string()));
            return MoveOutcome::Unauthorized(reason);
        }

        let applied = match self.engine.attempt(&intent) {
            Ok(applied) => applied,
            Err(error) => {
                warn!(%error, "Move refused by rules");
                self.broadcaster.send_to(
                    connection,
                    ServerEvent::MoveRejected {
                        intent,
                        reason: error.to_string(),
                    },
                );
                return MoveOutcome::Refused(error);
            }
        };

        let snapshot = self.engine.snapshot();
        self.broadcaster
            .publish(ServerEvent::MoveApplied(applied.clone()));
        let delivered = self.broadcaster.publish(ServerEvent::StateSnapshot(snapshot));
        info!(san = %applied.san, status = %applied.status, delivered, "Move broadcast");
        if applied.status.is_over() {
            info!(status = %applied.status, last_mover = %applied.side, "Game over");
        }

        MoveOutcome::Applied(applied)
    }
}
