//! Bidirectional messaging service: echo and broadcast over WebSocket.
//!
//! Clients send JSON frames tagged by `event`. A `message` frame is echoed to
//! every connected client through a shared broadcast channel; a
//! `client-message` frame is acknowledged to the sender only. Frames are not
//! persisted; a receiver that lags simply drops what it missed.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

const BROADCAST_CAPACITY: usize = 64;

/// Shared hub; every connection subscribes to the broadcast channel.
#[derive(Clone)]
pub struct MessagingState {
    tx: broadcast::Sender<ServerFrame>,
}

impl MessagingState {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }
}

impl Default for MessagingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames accepted from clients.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientFrame {
    /// Echoed to every connected client.
    Message(String),
    /// Acknowledged to the sender only.
    ClientMessage(String),
}

/// Frames sent by the server.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerFrame {
    Response(String),
    ServerMessage(String),
}

pub fn messaging_routes(state: MessagingState) -> Router {
    Router::new().route("/ws", get(upgrade)).with_state(state)
}

async fn upgrade(State(state): State<MessagingState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: MessagingState) {
    let client_id = Uuid::new_v4();
    tracing::info!(%client_id, "client connected");
    let mut rx = state.tx.subscribe();
    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let Some(Ok(message)) = incoming else { break };
                match message {
                    Message::Text(text) => {
                        handle_frame(&mut socket, &state, client_id, &text).await;
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            outgoing = rx.recv() => {
                match outgoing {
                    Ok(frame) => {
                        if send_frame(&mut socket, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(%client_id, skipped, "dropped broadcast frames");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
    tracing::info!(%client_id, "client disconnected");
}

async fn handle_frame(socket: &mut WebSocket, state: &MessagingState, client_id: Uuid, text: &str) {
    match serde_json::from_str::<ClientFrame>(text) {
        Ok(ClientFrame::Message(data)) => {
            tracing::debug!(%client_id, data = %data, "message");
            // The sender receives its own echo through its subscription.
            let _ = state.tx.send(ServerFrame::Response(format!("Echo: {data}")));
        }
        Ok(ClientFrame::ClientMessage(msg)) => {
            tracing::debug!(%client_id, msg = %msg, "client-message");
            let frame = ServerFrame::ServerMessage(format!("Server received: {msg}"));
            let _ = send_frame(socket, &frame).await;
        }
        Err(error) => {
            tracing::warn!(%client_id, %error, "unrecognized frame");
        }
    }
}

async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> Result<(), axum::Error> {
    match serde_json::to_string(frame) {
        Ok(text) => socket.send(Message::Text(text)).await,
        Err(error) => {
            tracing::error!(%error, "frame serialization failed");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_frames_parse_by_event_tag() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"event": "message", "data": "hello"}"#).unwrap();
        assert_eq!(frame, ClientFrame::Message("hello".to_string()));

        let frame: ClientFrame =
            serde_json::from_str(r#"{"event": "client-message", "data": "ping"}"#).unwrap();
        assert_eq!(frame, ClientFrame::ClientMessage("ping".to_string()));
    }

    #[test]
    fn unknown_events_fail_to_parse() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"event": "chatMessage", "data": "x"}"#)
            .is_err());
    }

    #[test]
    fn server_frames_serialize_with_event_tag() {
        let text = serde_json::to_string(&ServerFrame::Response("Echo: hi".to_string())).unwrap();
        assert_eq!(text, r#"{"event":"response","data":"Echo: hi"}"#);

        let text =
            serde_json::to_string(&ServerFrame::ServerMessage("Server received: hi".to_string()))
                .unwrap();
        assert_eq!(text, r#"{"event":"server-message","data":"Server received: hi"}"#);
    }
}
