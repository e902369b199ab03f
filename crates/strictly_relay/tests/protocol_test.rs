//! Tests for the wire encoding and frame dispatch.

use serde_json::json;
use strictly_chess::{ChessEngine, MoveIntent, Side};
use strictly_relay::{ClientEvent, ServerEvent, SharedTable, Table, dispatch_frame};
use tokio::sync::mpsc;

#[test]
fn test_server_event_encoding() {
    assert_eq!(
        serde_json::to_value(ServerEvent::RoleAssignment(Side::Black)).unwrap(),
        json!({"event": "role-assignment", "data": "black"})
    );
    assert_eq!(
        serde_json::to_value(ServerEvent::ObserverNotice).unwrap(),
        json!({"event": "observer-notice"})
    );
    assert_eq!(
        serde_json::to_value(ServerEvent::TurnRejected("not your turn".to_string())).unwrap(),
        json!({"event": "turn-rejected", "data": "not your turn"})
    );
    assert_eq!(
        serde_json::to_value(ServerEvent::MoveRejected {
            intent: MoveIntent::new("a1", "b2"),
            reason: "Illegal move a1b2".to_string(),
        })
        .unwrap(),
        json!({
            "event": "move-rejected",
            "data": {"intent": {"from": "a1", "to": "b2"}, "reason": "Illegal move a1b2"}
        })
    );
}

#[test]
fn test_move_submit_ignores_extra_client_fields() {
    let frame = r#"{"event":"move-submit","data":{"from":"e7","to":"e8","promotion":"q","color":"w","san":"e8=Q"}}"#;
    let event: ClientEvent = serde_json::from_str(frame).expect("valid frame");
    assert_eq!(
        event,
        ClientEvent::MoveSubmit(MoveIntent::new("e7", "e8").with_promotion("q"))
    );
}

#[tokio::test]
async fn test_dispatch_applies_submitted_move() {
    let table = SharedTable::new(Table::new(ChessEngine::new()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (white, _) = table.connect(tx).await;
    while rx.try_recv().is_ok() {}

    dispatch_frame(
        &table,
        white,
        r#"{"event":"move-submit","data":{"from":"e2","to":"e4"}}"#,
    )
    .await;

    assert!(matches!(rx.try_recv(), Ok(ServerEvent::MoveApplied(_))));
    assert_eq!(
        rx.try_recv().ok(),
        Some(ServerEvent::StateSnapshot(table.snapshot().await))
    );
}

#[tokio::test]
async fn test_dispatch_answers_garbage_with_protocol_error() {
    let table = SharedTable::new(Table::new(ChessEngine::new()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (white, _) = table.connect(tx).await;
    let (other_tx, mut other_rx) = mpsc::unbounded_channel();
    table.connect(other_tx).await;
    while rx.try_recv().is_ok() {}
    while other_rx.try_recv().is_ok() {}
    let before = table.snapshot().await;

    dispatch_frame(&table, white, "not json at all").await;
    dispatch_frame(&table, white, r#"{"event":"resign"}"#).await;

    for _ in 0..2 {
        assert!(matches!(rx.try_recv(), Ok(ServerEvent::ProtocolError(_))));
    }
    assert!(rx.try_recv().is_err());
    assert!(other_rx.try_recv().is_err());
    assert_eq!(table.snapshot().await, before);
}
