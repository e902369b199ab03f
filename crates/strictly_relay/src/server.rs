//! HTTP and WebSocket surface of the table.

use crate::lifecycle::ConnectionState;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::registry::ConnectionId;
use crate::table::SharedTable;
use axum::{
    Router,
    body::Body,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{Request, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use futures::{SinkExt, StreamExt};
use std::future::Future;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

const INDEX_HTML: &str = include_str!("../static/index.html");
const CHESSGAME_JS: &str = include_str!("../static/js/chessgame.js");
const STYLE_CSS: &str = include_str!("../static/css/style.css");

/// Builds the router: the client page, its assets and the event socket.
pub fn router(table: SharedTable) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/js/chessgame.js", get(chessgame_js))
        .route("/css/style.css", get(style_css))
        .route("/ws", get(ws_handler))
        .with_state(table)
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
}

/// Serves the table until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    table: SharedTable,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Table open for connections");
    axum::serve(listener, router(table))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn chessgame_js() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CHESSGAME_JS,
    )
        .into_response()
}

async fn style_css() -> Response {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS).into_response()
}

async fn ws_handler(ws: WebSocketUpgrade, State(table): State<SharedTable>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, table))
}

/// Drives one WebSocket from upgrade to close.
async fn handle_socket(socket: WebSocket, table: SharedTable) {
    let (mut sender, mut receiver) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerEvent>();

    debug!(state = ?ConnectionState::Connecting, "WebSocket upgraded");
    let (connection, admitted) = table.connect(outbox).await;
    debug!(%connection, state = ?admitted, "WebSocket admitted");

    let writer = tokio::spawn(async move {
        while let Some(event) = inbox.recv().await {
            let frame = match serde_json::to_string(&event) {
                Ok(frame) => frame,
                Err(e) => {
                    error!(%connection, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                debug!(%connection, "Socket closed while writing");
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Text(text)) => dispatch_frame(&table, connection, text.as_str()).await,
            Ok(Message::Close(_)) => {
                debug!(%connection, "Close frame received");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(%connection, error = %e, "WebSocket error");
                break;
            }
        }
    }

    let state = table.disconnect(connection).await;
    writer.abort();
    info!(%connection, ?state, "WebSocket connection terminated");
}

/// Decodes one client frame and routes it to the table.
///
/// A frame that is not a known event is answered with `protocol-error`
/// to the sender alone.
#[instrument(skip(table, text))]
pub async fn dispatch_frame(table: &SharedTable, connection: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(ClientEvent::MoveSubmit(intent)) => {
            let outcome = table.submit_move(connection, intent).await;
            debug!(?outcome, "Move processed");
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse client frame");
            table
                .send_to(
                    connection,
                    ServerEvent::ProtocolError(format!("Invalid message format: {}", e)),
                )
                .await;
        }
    }
}
