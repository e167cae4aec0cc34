//! Real-time push delivery over WebSocket connections.

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// Maps node ids to the outbound frame channel of their live WebSocket
/// connection.
///
/// Delivery is best-effort: a full or closed channel drops the frame and
/// a closed channel evicts the connection.
#[derive(Debug, Default)]
pub struct PushRegistry {
    connections: DashMap<String, mpsc::Sender<String>>,
}

impl PushRegistry {
    /// Creates an empty push registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a node id with a connection's outbound channel. A new
    /// connection for the same node replaces the old one.
    pub fn associate(&self, node_id: String, sender: mpsc::Sender<String>) {
        debug!(node_id = %node_id, "websocket associated");
        self.connections.insert(node_id, sender);
    }

    /// Drop the connection for a node id.
    pub fn disconnect(&self, node_id: &str) {
        self.connections.remove(node_id);
    }

    /// Number of associated connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// True if no connections are associated.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Send a frame to each of the given nodes, skipping nodes without a
    /// live connection. Returns how many frames were handed off.
    pub fn broadcast(&self, node_ids: &[String], frame: &str) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        for node_id in node_ids {
            if let Some(sender) = self.connections.get(node_id) {
                match sender.try_send(frame.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Closed(_)) => dead.push(node_id.clone()),
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        debug!(node_id = %node_id, "push buffer full, frame dropped");
                    }
                }
            }
        }

        for node_id in dead {
            self.connections.remove(&node_id);
        }
        delivered
    }
}
