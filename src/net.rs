use std::io;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::accept_async;
use tracing::{debug, info, warn};
use tungstenite::Message;

use crate::config::ServerConfig;
use crate::session::SharedSessionState;
use crate::side_zone::{TrackState, evaluate, preferred_side};

#[derive(Debug)]
enum ClientMessage {
    Ping,
    Reward(Value),
    Reset,
    Summary,
}

impl ClientMessage {
    fn from_json(txt: &str) -> Result<Self, String> {
        let v = serde_json::from_str::<Value>(txt).map_err(|e| format!("malformed json: {e}"))?;

        let msg_type = v
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| "missing message type".to_string())?;

        match msg_type {
            "ping" => Ok(ClientMessage::Ping),
            "reward" => Ok(ClientMessage::Reward(v.get("params").cloned().unwrap_or(Value::Null))),
            "reset" => Ok(ClientMessage::Reset),
            "summary" => Ok(ClientMessage::Summary),
            other => Err(format!("unknown message type: {other}")),
        }
    }
}

fn encode<T: Serialize>(msg: &T) -> String {
    serde_json::to_string(msg)
        .unwrap_or_else(|e| json!({"type": "error", "message": e.to_string()}).to_string())
}

fn error_frame(message: &str) -> String {
    json!({"type": "error", "message": message}).to_string()
}

/// Bind the configured address and serve reward requests until the process exits.
pub async fn start_websocket_server(
    config: ServerConfig,
    state: Arc<Mutex<SharedSessionState>>,
) -> io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    info!("🌐 WebSocket listening on ws://{}", listener.local_addr()?);
    serve(listener, state).await
}

pub async fn serve(listener: TcpListener, state: Arc<Mutex<SharedSessionState>>) -> io::Result<()> {
    loop {
        let (raw, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("accept failed: {e}");
                continue;
            }
        };
        let state_clone = Arc::clone(&state);

        tokio::spawn(async move {
            if let Err(e) = handle_connection(raw, state_clone).await {
                warn!(%peer, "connection ended with error: {e}");
            }
        });
    }
}

async fn handle_connection(
    raw: TcpStream,
    state: Arc<Mutex<SharedSessionState>>,
) -> Result<(), tungstenite::Error> {
    let ws = accept_async(raw).await?;
    let (mut write, mut read) = ws.split();

    // -------------------------------
    // 1) Outgoing channel + writer task
    // -------------------------------
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // -------------------------------
    // 2) Register session
    // -------------------------------
    let session_id = state.lock().await.open_session();
    info!("🟢 Session opened: {}", session_id);

    let _ = tx.send(json!({"type": "welcome", "session_id": session_id}).to_string());

    // -------------------------------
    // 3) Main receive loop
    // -------------------------------
    while let Some(msg) = read.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(_) => break,
        };

        if msg.is_close() {
            break;
        }
        if !msg.is_text() {
            continue;
        }
        let text = match msg.to_text() {
            Ok(t) => t,
            Err(_) => continue,
        };

        let reply = handle_text(text, &session_id, &state).await;
        let _ = tx.send(reply);
    }

    let closed = state.lock().await.close_session(&session_id);
    if let Some(session) = closed {
        info!(
            "🔴 Session closed: {} (episode {}, {} steps, total {:.3})",
            session.id, session.episode, session.steps, session.total
        );
    }
    Ok(())
}

async fn handle_text(text: &str, session_id: &str, state: &Arc<Mutex<SharedSessionState>>) -> String {
    let parsed = match ClientMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            warn!(session = session_id, "{e}");
            return error_frame(&e);
        }
    };

    match parsed {
        ClientMessage::Ping => json!({"type": "pong"}).to_string(),

        ClientMessage::Reward(params) => {
            let track_state = match TrackState::from_params(&params) {
                Ok(s) => s,
                Err(e) => {
                    warn!(session = session_id, "rejected params: {e}");
                    return error_frame(&e.to_string());
                }
            };
            let reward = match evaluate(&track_state) {
                Ok(r) => r,
                Err(e) => {
                    warn!(session = session_id, "rejected params: {e}");
                    return error_frame(&e.to_string());
                }
            };

            let mut table = state.lock().await;
            let Some(session) = table.get_mut(session_id) else {
                return error_frame("session not found");
            };
            let reply = session.record(reward);

            debug!(
                session = session_id,
                step = reply.step,
                waypoint = ?track_state.nearest_waypoint().ok().flatten(),
                side = %track_state.side(),
                preferred = ?track_state.nearest_waypoint().ok().flatten().and_then(preferred_side),
                reward,
                "scored step"
            );
            encode(&reply)
        }

        ClientMessage::Reset => {
            let mut table = state.lock().await;
            match table.get_mut(session_id) {
                Some(session) => {
                    let episode = session.reset();
                    debug!(session = session_id, episode, "episode reset");
                    json!({"type": "reset", "episode": episode}).to_string()
                }
                None => error_frame("session not found"),
            }
        }

        ClientMessage::Summary => {
            let table = state.lock().await;
            match table.sessions.get(session_id) {
                Some(session) => encode(&session.summary()),
                None => error_frame("session not found"),
            }
        }
    }
}
