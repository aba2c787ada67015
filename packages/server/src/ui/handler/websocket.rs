//! WebSocket connection handlers.
//!
//! One task per socket. A connection starts unbound; it becomes part of a
//! room only when a `join` envelope arrives. All protocol errors go back to
//! the offending connection as an `error` envelope and never close the
//! socket or touch shared state.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, PusherChannel, RoomId, SuppliedUser},
    infrastructure::dto::websocket::{
        ChatMessagePayload, ChatPayload, Envelope, ErrorPayload, JoinPayload, JoinedPayload,
        RoomMembersUpdatePayload, ServerEnvelope, TimerStatusBroadcast, TimerStatusPayload,
        parse_payload,
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Connections carry no identity at upgrade time; the join payload does
    let connection_id = ConnectionIdFactory::generate();
    tracing::debug!("Accepting websocket connection '{}'", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This function handles the outbound message flow: acks, errors and room
/// broadcasts land on the channel and are written to this client's socket.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Per-connection outbound channel; the hub holds a clone after join
    let (tx, rx) = mpsc::unbounded_channel();

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let recv_tx = tx.clone();

    // Receive messages from this client and route them
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    route_message(&recv_state, &recv_connection_id, &recv_tx, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // A transport-level disconnect counts as a leave. The roster update goes
    // out only if the connection was still bound (an explicit leave already
    // broadcast it and left nothing to clean up).
    if let Some(room_id) = state.leave_room_usecase.execute(&connection_id).await {
        tracing::info!(
            "Connection '{}' disconnected from room {}",
            connection_id,
            room_id
        );
        broadcast_members_update(&state, room_id).await;
    }
}

/// Parse one inbound envelope and dispatch it to the matching operation.
async fn route_message(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    text: &str,
) {
    let envelope: Envelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Invalid JSON from '{}': {}", connection_id, e);
            send_error(tx, "invalid json");
            return;
        }
    };

    match envelope.message_type.as_str() {
        "join" => handle_join(state, connection_id, tx, envelope.payload).await,
        "leave" => handle_leave(state, connection_id).await,
        "chat" => handle_chat(state, connection_id, tx, envelope.payload).await,
        "timerStatus" => handle_timer_status(state, connection_id, tx, envelope.payload).await,
        other => {
            tracing::warn!("Unknown message type '{}' from '{}'", other, connection_id);
            send_error(tx, "unknown type");
        }
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    payload: serde_json::Value,
) {
    let payload: JoinPayload = match parse_payload(payload) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Malformed join payload from '{}': {}", connection_id, e);
            send_error(tx, "invalid payload");
            return;
        }
    };

    let room_id = payload.room_id.map(RoomId::new);
    let user = payload
        .user
        .map(|u| SuppliedUser {
            id: u.id,
            name: u.name,
        })
        .unwrap_or_default();

    match state
        .join_room_usecase
        .execute(connection_id.clone(), tx.clone(), room_id, user)
        .await
    {
        Ok(joined) => {
            // ack so a client without a prior id learns its server-assigned one
            send_envelope(
                tx,
                &ServerEnvelope::Joined(JoinedPayload {
                    room_id: joined.room_id.value(),
                    user: joined.user.into(),
                }),
            );
            broadcast_members_update(state, joined.room_id).await;
        }
        Err(e) => send_error(tx, &e.to_string()),
    }
}

async fn handle_leave(state: &Arc<AppState>, connection_id: &ConnectionId) {
    if let Some(room_id) = state.leave_room_usecase.execute(connection_id).await {
        broadcast_members_update(state, room_id).await;
    }
}

async fn handle_chat(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    payload: serde_json::Value,
) {
    let payload: ChatPayload = match parse_payload(payload) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Malformed chat payload from '{}': {}", connection_id, e);
            send_error(tx, "invalid payload");
            return;
        }
    };

    let content = payload.content.unwrap_or_default();

    match state
        .send_chat_usecase
        .execute(connection_id, payload.room_id.map(RoomId::new), &content)
        .await
    {
        Ok(broadcast) => {
            let room_id = broadcast.room_id;
            let envelope = ServerEnvelope::ChatMessage(ChatMessagePayload {
                id: broadcast.id,
                room_id: room_id.value(),
                user: broadcast.user.into(),
                content: broadcast.content.into_string(),
                timestamp: broadcast.timestamp.value(),
            });
            if let Some(json) = encode_envelope(&envelope) {
                state.send_chat_usecase.broadcast(room_id, &json).await;
            }
        }
        Err(e) => send_error(tx, &e.to_string()),
    }
}

async fn handle_timer_status(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    payload: serde_json::Value,
) {
    let payload: TimerStatusPayload = match parse_payload(payload) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(
                "Malformed timerStatus payload from '{}': {}",
                connection_id,
                e
            );
            send_error(tx, "invalid payload");
            return;
        }
    };

    match state
        .update_timer_status_usecase
        .execute(connection_id, payload.status)
        .await
    {
        Ok(change) => {
            let room_id = change.room_id;
            let envelope = ServerEnvelope::TimerStatus(TimerStatusBroadcast {
                room_id: room_id.value(),
                user_id: change.user_id.into_string(),
                status: change.echo_status,
            });
            if let Some(json) = encode_envelope(&envelope) {
                state
                    .update_timer_status_usecase
                    .broadcast(room_id, &json)
                    .await;
            }
            // status is part of the presence view, so the roster goes out too
            broadcast_members_update(state, room_id).await;
        }
        Err(e) => send_error(tx, &e.to_string()),
    }
}

/// Snapshot a room's roster and broadcast it as `roomMembersUpdate`.
async fn broadcast_members_update(state: &Arc<AppState>, room_id: RoomId) {
    let snapshot = state.get_room_presence_usecase.execute(room_id).await;
    let envelope = ServerEnvelope::RoomMembersUpdate(RoomMembersUpdatePayload::from(snapshot));
    if let Some(json) = encode_envelope(&envelope) {
        state
            .get_room_presence_usecase
            .broadcast(room_id, &json)
            .await;
    }
}

fn encode_envelope(envelope: &ServerEnvelope) -> Option<String> {
    match serde_json::to_string(envelope) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize envelope: {}", e);
            None
        }
    }
}

fn send_envelope(tx: &PusherChannel, envelope: &ServerEnvelope) {
    if let Some(json) = encode_envelope(envelope) {
        // A closed receiver means the socket is going away; the disconnect
        // path performs the cleanup, so the send result is not interesting.
        let _ = tx.send(json);
    }
}

fn send_error(tx: &PusherChannel, message: &str) {
    send_envelope(
        tx,
        &ServerEnvelope::Error(ErrorPayload {
            message: message.to_string(),
        }),
    );
}
