//! In-memory node registry.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use nodelink_types::{NetworkNode, SecurityLevel};

/// Concurrent registry of known nodes.
///
/// The hot-path view of the durable `nodes` table: credential lookups and
/// heartbeats run against this map while re-registrations overwrite
/// entries wholesale (last write wins).
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: DashMap<String, NetworkNode>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace a node record.
    pub fn upsert(&self, node: NetworkNode) {
        self.nodes.insert(node.node_id.clone(), node);
    }

    /// Clone of the record for a node id.
    pub fn get(&self, node_id: &str) -> Option<NetworkNode> {
        self.nodes.get(node_id).map(|entry| entry.clone())
    }

    /// Refresh a node's `last_seen`; returns the updated record for
    /// persistence, or `None` for unknown nodes.
    pub fn touch(&self, node_id: &str, seen_at: DateTime<Utc>) -> Option<NetworkNode> {
        self.nodes.get_mut(node_id).map(|mut entry| {
            entry.last_seen = seen_at;
            entry.clone()
        })
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no nodes are registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of every node cleared for broadcasts at `min_level` or above.
    pub fn cleared_for(&self, min_level: SecurityLevel) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|entry| entry.security_level >= min_level)
            .map(|entry| entry.node_id.clone())
            .collect()
    }
}
