//! The transport gateway: a thin Axum WebSocket endpoint that turns frames
//! on the wire into calls against the matchmaking core. It owns no
//! matchmaking state itself — authentication happens once per connection
//! against `IdentityStorePort`, after which every decoded frame is handed
//! to the `Dispatcher` in arrival order, and every `OutboundEvent` the core
//! produces for this session is forwarded back out as a JSON text frame.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use rendezvous_app::{AppDeps, Dispatcher};
use rendezvous_core::ports::IdentityStorePort;
use rendezvous_core::{InboundEvent, Session, Tier};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Query parameters carried on the WebSocket upgrade request. A GET request
/// cannot carry an arbitrary inbound frame, so the bearer token (and, for
/// this stand-in deployment, the caller's tier) ride along as query
/// parameters instead — the same tradeoff every bearer-token-over-WebSocket
/// gateway makes.
#[derive(Debug, serde::Deserialize)]
pub struct WsParams {
    pub token: String,
    #[serde(default)]
    pub tier: Option<Tier>,
}

/// `GET /ws?token=...` — authenticates the token before accepting the
/// upgrade; an invalid token gets a plain 401 and no upgrade is attempted.
pub async fn upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(deps): State<Arc<AppDeps>>,
) -> Response {
    let user_id = match deps.identity_store.authenticate(&params.token).await {
        Ok(user_id) => user_id,
        Err(err) => {
            debug!(error = %err, "rejected websocket upgrade: authentication failed");
            return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
        }
    };

    let tier = params.tier.unwrap_or_default();
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, tier, deps))
}

#[instrument(skip(socket, deps), fields(user_id = %user_id))]
async fn handle_socket(socket: WebSocket, user_id: rendezvous_core::ids::UserId, tier: Tier, deps: Arc<AppDeps>) {
    let (mut sink, mut stream) = socket.split();

    let session = Session::new(rendezvous_core::ids::SessionId::new(), user_id, tier);
    let mut outbound = deps.registry.register(session.clone());
    info!(session_id = %session.id, "session registered");

    let dispatcher = Dispatcher::new(deps.clone());

    // Forward outbound events from the registry's per-session channel to
    // the socket. At-most-once: if the socket send fails the event is
    // simply dropped, matching the core's delivery guarantee.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let Ok(json) = serde_json::to_string(&event) else {
                warn!("failed to encode outbound event; dropping");
                continue;
            };
            if sink.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    // Handle inbound frames. Exactly one task per session reads this
    // stream, so per-session inbound event order is preserved by
    // construction (§5).
    let recv_session = session.clone();
    let recv_dispatcher_deps = deps.clone();
    let mut recv_task = tokio::spawn(async move {
        let dispatcher = Dispatcher::new(recv_dispatcher_deps);
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<InboundEvent>(&text) {
                        Ok(event) => dispatcher.dispatch(&recv_session, event).await,
                        Err(err) => {
                            debug!(error = %err, "dropping malformed inbound frame");
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {
                    // Binary/Ping/Pong frames carry no matchmaking meaning.
                }
                Some(Err(err)) => {
                    debug!(error = %err, "websocket receive error; closing connection");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    dispatcher.disconnect(&session.id).await;
    info!(session_id = %session.id, "session torn down");
}
