use crate::conversation::ConversationStore;
use crate::models::websocket::{ ClientMessage, ServerMessage };
use crate::reframe::Reframer;
use crate::render::render;

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{ Sink, SinkExt, StreamExt };
use log::{ debug, error, info, warn };
use tokio::io::{ AsyncRead, AsyncWrite };
use tokio::net::TcpListener;
use tokio_tungstenite::{ accept_async, WebSocketStream };
use tokio_tungstenite::tungstenite::{ self, protocol::Message };
use uuid::Uuid;

const MAX_MESSAGE_SIZE: usize = 1 * 1024 * 1024;

pub async fn start_ws_server(
    addr: &str,
    reframer: Arc<Reframer>
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    info!("WS server listening on: {}", addr);
    serve_ws(listener, reframer).await
}

/// Accepts connections forever; each one becomes an independent session.
pub async fn serve_ws(
    listener: TcpListener,
    reframer: Arc<Reframer>
) -> Result<(), Box<dyn Error + Send + Sync>> {
    loop {
        let (stream, peer) = listener.accept().await?;
        info!("Incoming connection from: {}", peer);
        let reframer = Arc::clone(&reframer);

        tokio::spawn(async move {
            match accept_async(stream).await {
                Ok(ws) => handle_connection(peer, ws, reframer).await,
                Err(e) => error!("Handshake failed for {}: {}", peer, e),
            }
        });
    }
}

async fn send_frame<W>(tx: &mut W, frame: &ServerMessage) -> Result<(), Box<dyn Error + Send + Sync>>
    where W: Sink<Message, Error = tungstenite::Error> + Unpin
{
    let json = serde_json::to_string(frame)?;
    tx.send(Message::Text(json)).await?;
    Ok(())
}

pub async fn handle_connection<S>(
    peer: SocketAddr,
    websocket: WebSocketStream<S>,
    reframer: Arc<Reframer>
)
    where S: AsyncRead + AsyncWrite + Unpin
{
    let (mut tx, mut rx) = websocket.split();
    let session_id = Uuid::new_v4().to_string();
    info!("Assigned session ID {} to {}", session_id, peer);

    let store = ConversationStore::new(reframer);
    let mut changes = store.subscribe();

    let initial = ServerMessage::State(render(&store.snapshot().await));
    if let Err(e) = send_frame(&mut tx, &initial).await {
        error!("Failed to send initial state to {}: {}", peer, e);
        return;
    }

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = ServerMessage::State(render(&changes.borrow_and_update()));
                if let Err(e) = send_frame(&mut tx, &frame).await {
                    error!("Error sending state to {}: {}", peer, e);
                    break;
                }
            }
            incoming = rx.next() => {
                let Some(msg) = incoming else {
                    break;
                };
                match msg {
                    Ok(message) => {
                        if message.len() > MAX_MESSAGE_SIZE {
                            warn!(
                                "Message from {} exceeds size limit ({} > {})",
                                peer,
                                message.len(),
                                MAX_MESSAGE_SIZE
                            );
                            let frame = ServerMessage::Error {
                                message: "Message too large".to_string(),
                            };
                            if send_frame(&mut tx, &frame).await.is_err() {
                                error!("Failed to send size limit error to {}", peer);
                            }
                            break;
                        }

                        match message {
                            Message::Text(text) => {
                                match serde_json::from_str::<ClientMessage>(&text) {
                                    Ok(ClientMessage::Submit { content }) => {
                                        if store.submit(&content).await.is_none() {
                                            debug!("{} submission ignored", peer);
                                        }
                                    }
                                    Ok(ClientMessage::Clear) => store.clear().await,
                                    Err(e) => {
                                        error!("Failed to parse message from {}: {}", peer, e);
                                        let frame = ServerMessage::Error {
                                            message: format!("Failed to parse message: {}", e),
                                        };
                                        if let Err(e) = send_frame(&mut tx, &frame).await {
                                            error!("Error sending parse error to {}: {}", peer, e);
                                            break;
                                        }
                                    }
                                }
                            }
                            Message::Close(_) => {
                                info!("Received close frame from {}", peer);
                                break;
                            }
                            Message::Ping(ping_data) => {
                                if tx.send(Message::Pong(ping_data)).await.is_err() {
                                    error!("Failed to send pong to {}", peer);
                                    break;
                                }
                            }
                            Message::Pong(_) => {}
                            Message::Binary(_) => {
                                warn!("Ignoring binary message from {}", peer);
                            }
                            Message::Frame(_) => {}
                        }
                    }
                    Err(e) => {
                        match e {
                            | tungstenite::Error::ConnectionClosed
                            | tungstenite::Error::Protocol(_)
                            | tungstenite::Error::Utf8 => {
                                info!("WebSocket connection closed or protocol error for {}: {}", peer, e);
                            }
                            tungstenite::Error::Io(ref io_err) if
                                io_err.kind() == std::io::ErrorKind::ConnectionReset
                            => {
                                info!("WebSocket connection reset by peer {}", peer);
                            }
                            _ => {
                                error!("Error receiving message from {}: {}", peer, e);
                            }
                        }
                        break;
                    }
                }
            }
        }
    }
    info!("WebSocket connection closed for {} (Session ID: {})", peer, session_id);
}
