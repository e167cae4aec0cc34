//! WebSocket handler for real-time envelope exchange.
//!
//! Inbound text frames are parsed as envelopes and run through the same
//! receive path as `POST /api/message`; each frame is answered with a
//! status or error frame. Once a connection has submitted a valid
//! envelope it is associated with that sender id in the push registry and
//! starts receiving broadcast frames.

use crate::hub::Hub;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use nodelink_types::Envelope;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Drive one WebSocket connection until it closes.
pub async fn handle_socket(hub: Arc<Hub>, socket: WebSocket) {
    info!("new websocket connection");

    let (mut sink, mut stream) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<String>(hub.config().push_capacity);

    // Outbound pump: acks and broadcast frames share one channel so
    // writes never interleave on the socket.
    let send_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if sink.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    });

    let mut associated: Option<String> = None;

    while let Some(result) = stream.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "websocket receive error");
                break;
            }
        };

        match message {
            Message::Text(text) => {
                let frame = match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => match hub.receive(&envelope).await {
                        Ok(processed) => {
                            if associated.is_none() {
                                hub.push_registry()
                                    .associate(processed.sender_id.clone(), outbound_tx.clone());
                                associated = Some(processed.sender_id);
                            }
                            serde_json::json!({ "status": "message_processed" })
                        }
                        Err(e) => serde_json::json!({ "error": e.to_string() }),
                    },
                    Err(e) => {
                        serde_json::json!({ "error": format!("malformed envelope: {e}") })
                    }
                };

                if outbound_tx.send(frame.to_string()).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => {
                debug!("websocket closed by peer");
                break;
            }
            // Pings are answered by axum; binary frames are not part of
            // the protocol.
            _ => {}
        }
    }

    if let Some(node_id) = associated {
        hub.push_registry().disconnect(&node_id);
        debug!(node_id = %node_id, "websocket disassociated");
    }
    send_task.abort();
}
