use ai_reality_check::llm::chat::testing::ScriptedChatClient;
use ai_reality_check::llm::chat::CompletionResponse;
use ai_reality_check::llm::GenerationParams;
use ai_reality_check::reframe::Reframer;
use ai_reality_check::server::websocket::serve_ws;
use futures::{ SinkExt, StreamExt };
use serde_json::{ json, Value };
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{ TcpListener, TcpStream };
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{ connect_async, MaybeTlsStream, WebSocketStream };

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server(reframer: Reframer) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_ws(listener, Arc::new(reframer)));
    format!("ws://{}", addr)
}

async fn connect(url: &str) -> Client {
    let (ws, _) = connect_async(url).await.unwrap();
    ws
}

async fn next_frame(ws: &mut Client) -> Value {
    loop {
        let msg = tokio::time
            ::timeout(Duration::from_secs(5), ws.next()).await
            .expect("frame within timeout")
            .expect("stream open")
            .expect("valid frame");
        if let Message::Text(text) = msg {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

/// Skips state frames until one satisfies `pred`.
async fn wait_for_state(ws: &mut Client, pred: impl Fn(&Value) -> bool) -> Value {
    loop {
        let frame = next_frame(ws).await;
        if frame["type"] == "state" && pred(&frame) {
            return frame;
        }
    }
}

async fn send(ws: &mut Client, frame: Value) {
    ws.send(Message::Text(frame.to_string())).await.unwrap();
}

fn message_count(frame: &Value) -> usize {
    frame["messages"].as_array().map(|m| m.len()).unwrap_or(0)
}

#[tokio::test]
async fn session_streams_state_through_a_reframing_cycle() {
    let client = Arc::new(ScriptedChatClient::new());
    let gate = client.queue_gated();
    let url = spawn_server(Reframer::new(client.clone(), GenerationParams::default())).await;
    let mut ws = connect(&url).await;

    let initial = next_frame(&mut ws).await;
    assert_eq!(initial["type"], "state");
    assert_eq!(initial["welcome"]["title"], "Welcome to AI Reality Check!");
    assert_eq!(initial["can_submit"], true);

    send(&mut ws, json!({ "type": "submit", "content": "  I'm worried AI will replace me " })).await;
    let pending = wait_for_state(&mut ws, |f| f["thinking"].is_string()).await;
    assert_eq!(message_count(&pending), 1);
    assert_eq!(pending["messages"][0]["content"], "I'm worried AI will replace me");
    assert_eq!(pending["messages"][0]["align"], "right");
    assert_eq!(pending["can_submit"], false);

    gate.send(Ok(CompletionResponse { response: "Here's a balanced view...".into() })).unwrap();
    let done = wait_for_state(&mut ws, |f| message_count(f) == 2).await;
    assert_eq!(done["messages"][1]["role"], "model");
    assert_eq!(done["messages"][1]["content"], "Here's a balanced view...");
    assert!(done["thinking"].is_null());
    assert_eq!(done["can_submit"], true);

    send(&mut ws, json!({ "type": "clear" })).await;
    let cleared = wait_for_state(&mut ws, |f| message_count(f) == 0).await;
    assert!(cleared["welcome"].is_object());
    assert!(cleared["error"].is_null());
}

#[tokio::test]
async fn missing_credential_shows_banner_and_transcript_entry() {
    let url = spawn_server(Reframer::unconfigured(GenerationParams::default())).await;
    let mut ws = connect(&url).await;
    next_frame(&mut ws).await;

    send(&mut ws, json!({ "type": "submit", "content": "test" })).await;
    let done = wait_for_state(&mut ws, |f| message_count(f) == 2).await;

    let banner = done["error"].as_str().expect("error banner");
    assert!(banner.starts_with("API_KEY is not defined"));
    assert!(done["messages"][1]["content"].as_str().unwrap().contains(banner));
    assert_eq!(done["can_submit"], true);
}

#[tokio::test]
async fn malformed_frames_get_an_error_reply() {
    let client = Arc::new(ScriptedChatClient::new());
    client.queue_response("ok");
    let url = spawn_server(Reframer::new(client, GenerationParams::default())).await;
    let mut ws = connect(&url).await;
    next_frame(&mut ws).await;

    ws.send(Message::Text("not json".into())).await.unwrap();
    let error = next_frame(&mut ws).await;
    assert_eq!(error["type"], "error");
    assert!(error["message"].as_str().unwrap().starts_with("Failed to parse message"));

    send(&mut ws, json!({ "type": "submit", "content": "still here" })).await;
    let done = wait_for_state(&mut ws, |f| message_count(f) == 2).await;
    assert_eq!(done["messages"][1]["content"], "ok");
}

#[tokio::test]
async fn each_connection_owns_its_conversation() {
    let client = Arc::new(ScriptedChatClient::new());
    client.queue_response("first answer");
    client.queue_response("second answer");
    let url = spawn_server(Reframer::new(client, GenerationParams::default())).await;

    let mut a = connect(&url).await;
    next_frame(&mut a).await;
    send(&mut a, json!({ "type": "submit", "content": "from a" })).await;
    wait_for_state(&mut a, |f| message_count(f) == 2).await;

    let mut b = connect(&url).await;
    let fresh = next_frame(&mut b).await;
    assert_eq!(message_count(&fresh), 0);

    send(&mut b, json!({ "type": "submit", "content": "from b" })).await;
    let done = wait_for_state(&mut b, |f| message_count(f) == 2).await;
    assert_eq!(done["messages"][0]["content"], "from b");
    assert_eq!(done["messages"][1]["content"], "second answer");
}
