use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tungstenite::Message;

use track_reward_server::net::serve;
use track_reward_server::session::SharedSessionState;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start() -> (Client, Arc<Mutex<SharedSessionState>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = Arc::new(Mutex::new(SharedSessionState::new()));
    tokio::spawn(serve(listener, Arc::clone(&state)));

    let (ws, _) = connect_async(format!("ws://{addr}")).await.unwrap();
    (ws, state)
}

async fn recv(ws: &mut Client) -> Value {
    loop {
        let msg = ws.next().await.expect("stream closed").unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

async fn request(ws: &mut Client, body: Value) -> Value {
    ws.send(Message::Text(body.to_string())).await.unwrap();
    recv(ws).await
}

#[tokio::test]
async fn welcome_then_pong() {
    let (mut ws, state) = start().await;

    let welcome = recv(&mut ws).await;
    assert_eq!(welcome["type"], "welcome");
    let id = welcome["session_id"].as_str().unwrap().to_string();
    assert!(state.lock().await.sessions.contains_key(&id));

    let pong = request(&mut ws, json!({"type": "ping"})).await;
    assert_eq!(pong, json!({"type": "pong"}));
}

#[tokio::test]
async fn rewards_accumulate_per_episode() {
    let (mut ws, _state) = start().await;
    recv(&mut ws).await;

    let first = request(
        &mut ws,
        json!({"type": "reward", "params": {
            "is_left_of_center": true,
            "closest_waypoints": [22, 23],
            "speed": 3.0,
        }}),
    )
    .await;
    assert_eq!(first["type"], "reward");
    assert_eq!(first["step"], 1);
    assert_eq!(first["reward"], 1.0);

    let second = request(
        &mut ws,
        json!({"type": "reward", "params": {
            "is_left_of_center": true,
            "closest_waypoints": [50, 51],
        }}),
    )
    .await;
    assert_eq!(second["step"], 2);
    assert_eq!(second["reward"], 0.001);
    assert!((second["total"].as_f64().unwrap() - 1.001).abs() < 1e-12);

    let summary = request(&mut ws, json!({"type": "summary"})).await;
    assert_eq!(summary["episode"], 0);
    assert_eq!(summary["steps"], 2);
    assert_eq!(summary["last"], 0.001);

    let reset = request(&mut ws, json!({"type": "reset"})).await;
    assert_eq!(reset, json!({"type": "reset", "episode": 1}));

    let summary = request(&mut ws, json!({"type": "summary"})).await;
    assert_eq!(summary["steps"], 0);
    assert_eq!(summary["last"], Value::Null);
}

#[tokio::test]
async fn bad_requests_get_error_frames() {
    let (mut ws, _state) = start().await;
    recv(&mut ws).await;

    ws.send(Message::Text("{not json".into())).await.unwrap();
    assert_eq!(recv(&mut ws).await["type"], "error");

    let unknown = request(&mut ws, json!({"type": "steer"})).await;
    assert_eq!(unknown["type"], "error");

    let missing = request(
        &mut ws,
        json!({"type": "reward", "params": {"closest_waypoints": [1, 2]}}),
    )
    .await;
    assert_eq!(missing["type"], "error");
    assert_eq!(missing["message"], "missing field: is_left_of_center");

    let empty = request(
        &mut ws,
        json!({"type": "reward", "params": {"is_left_of_center": true, "closest_waypoints": []}}),
    )
    .await;
    assert_eq!(empty["type"], "error");

    // connection survives and no step was counted
    let summary = request(&mut ws, json!({"type": "summary"})).await;
    assert_eq!(summary["steps"], 0);
}

#[tokio::test]
async fn session_removed_on_close() {
    let (mut ws, state) = start().await;
    let welcome = recv(&mut ws).await;
    let id = welcome["session_id"].as_str().unwrap().to_string();

    ws.close(None).await.unwrap();
    // drain until the server finishes the close handshake
    while let Some(Ok(_)) = ws.next().await {}

    for _ in 0..50 {
        if !state.lock().await.sessions.contains_key(&id) {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("session {id} still registered after close");
}
