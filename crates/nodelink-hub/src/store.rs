//! Typed durable store over the key-value port.
//!
//! Three tables share one keyspace via prefixes:
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | nodes | `node:{node_id}` | bincode [`NetworkNode`] |
//! | credentials | `cred:{node_id}` | bincode [`NodeCredentials`] |
//! | messages | `msg:{message_id}` | bincode [`MessageLogRecord`] |
//!
//! Node and credential writes are last-write-wins by id; the message log
//! is append-only.

use crate::errors::StoreError;
use crate::ports::{BatchOperation, KeyValueStore};
use chrono::{DateTime, Utc};
use nodelink_types::{MessageType, NetworkNode, NodeCredentials, SecureMessage};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const NODE_PREFIX: &str = "node:";
const CRED_PREFIX: &str = "cred:";
const MSG_PREFIX: &str = "msg:";

/// Append-only message log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLogRecord {
    /// Envelope message id
    pub message_id: String,
    /// Sending node id
    pub sender_id: String,
    /// Receiving node id
    pub recipient_id: String,
    /// Message type tag
    pub message_type: MessageType,
    /// Sender-side creation instant
    pub timestamp: DateTime<Utc>,
    /// Whether dispatch completed
    pub processed: bool,
}

impl MessageLogRecord {
    /// Log row for a successfully processed message.
    pub fn processed(message: &SecureMessage) -> Self {
        Self {
            message_id: message.message_id.clone(),
            sender_id: message.sender_id.clone(),
            recipient_id: message.recipient_id.clone(),
            message_type: message.message_type,
            timestamp: message.timestamp,
            processed: true,
        }
    }
}

/// Durable state access for the hub, shared across request handlers.
#[derive(Clone)]
pub struct NodeStore {
    kv: Arc<RwLock<dyn KeyValueStore>>,
}

impl NodeStore {
    /// Wrap a key-value adapter.
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self {
            kv: Arc::new(RwLock::new(kv)),
        }
    }

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Persist a node and its credentials as a single atomic unit.
    ///
    /// Either both records land or neither does, so a failed registration
    /// leaves no partial state.
    pub fn put_registration(
        &self,
        node: &NetworkNode,
        credentials: &NodeCredentials,
    ) -> Result<(), StoreError> {
        let operations = vec![
            BatchOperation::put(
                format!("{NODE_PREFIX}{}", node.node_id),
                Self::encode(node)?,
            ),
            BatchOperation::put(
                format!("{CRED_PREFIX}{}", credentials.node_id),
                Self::encode(credentials)?,
            ),
        ];
        self.kv.write().atomic_batch_write(operations)
    }

    /// Overwrite a node record (heartbeat refresh).
    pub fn put_node(&self, node: &NetworkNode) -> Result<(), StoreError> {
        self.kv.write().put(
            format!("{NODE_PREFIX}{}", node.node_id).as_bytes(),
            &Self::encode(node)?,
        )
    }

    /// Load credentials by node id.
    pub fn load_credentials(&self, node_id: &str) -> Result<Option<NodeCredentials>, StoreError> {
        let bytes = self
            .kv
            .read()
            .get(format!("{CRED_PREFIX}{node_id}").as_bytes())?;
        bytes.map(|b| Self::decode(&b)).transpose()
    }

    /// Load every stored node record (registry warm start).
    pub fn load_nodes(&self) -> Result<Vec<NetworkNode>, StoreError> {
        self.kv
            .read()
            .prefix_scan(NODE_PREFIX.as_bytes())?
            .iter()
            .map(|(_, v)| Self::decode(v))
            .collect()
    }

    /// Append a message-log row.
    pub fn log_message(&self, record: &MessageLogRecord) -> Result<(), StoreError> {
        self.kv.write().put(
            format!("{MSG_PREFIX}{}", record.message_id).as_bytes(),
            &Self::encode(record)?,
        )
    }

    /// Number of logged messages.
    pub fn message_count(&self) -> Result<usize, StoreError> {
        Ok(self.kv.read().prefix_scan(MSG_PREFIX.as_bytes())?.len())
    }
}
