//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the hub requires the host application to provide: the
//! durable key-value store and the external collaborators that consume
//! routed messages.

use crate::errors::StoreError;
use async_trait::async_trait;
use nodelink_types::SecureMessage;

/// Abstract interface for key-value database operations.
///
/// Production: `FileBackedKVStore`. Testing: `InMemoryKVStore`.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Put a single key-value pair (last write wins).
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Execute an atomic batch write: either every operation in the batch
    /// is applied, or none are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, StoreError>;

    /// Iterate over entries whose key starts with a prefix.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Record key
        key: Vec<u8>,
        /// Record value
        value: Vec<u8>,
    },
    /// Delete a key.
    Delete {
        /// Record key
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Collaborator that consumes intelligence reports.
///
/// The fusion pipeline lives outside this core; the default adapter only
/// logs what it receives.
#[async_trait]
pub trait IntelligenceSink: Send + Sync {
    /// Hand off a decrypted intel report.
    async fn ingest(&self, message: &SecureMessage);
}

/// Collaborator that executes emergency burn procedures.
#[async_trait]
pub trait BurnProcedure: Send + Sync {
    /// Hand off a decrypted burn trigger.
    async fn execute(&self, message: &SecureMessage);
}
