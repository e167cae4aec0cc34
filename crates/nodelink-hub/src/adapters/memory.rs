//! In-memory key-value store for unit tests.

use crate::errors::StoreError;
use crate::ports::{BatchOperation, KeyValueStore};
use std::collections::HashMap;

/// In-memory key-value store.
///
/// Batch writes are trivially atomic under the single-writer lock the
/// hub wraps stores in. Production uses `FileBackedKVStore`.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let results: Vec<_> = self
            .data
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_exists() {
        let mut store = InMemoryKVStore::new();

        store.put(b"key1", b"value1").unwrap();

        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get(b"key2").unwrap(), None);
        assert!(store.exists(b"key1").unwrap());
        assert!(!store.exists(b"key2").unwrap());
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = InMemoryKVStore::new();

        store.put(b"key", b"old").unwrap();
        store.put(b"key", b"new").unwrap();

        assert_eq!(store.get(b"key").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn test_batch_write() {
        let mut store = InMemoryKVStore::new();

        store
            .atomic_batch_write(vec![
                BatchOperation::put(b"a", b"1"),
                BatchOperation::put(b"b", b"2"),
            ])
            .unwrap();

        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_prefix_scan() {
        let mut store = InMemoryKVStore::new();

        store.put(b"node:1", b"n1").unwrap();
        store.put(b"node:2", b"n2").unwrap();
        store.put(b"cred:1", b"c1").unwrap();

        assert_eq!(store.prefix_scan(b"node:").unwrap().len(), 2);
        assert_eq!(store.prefix_scan(b"cred:").unwrap().len(), 1);
    }
}
