use std::sync::Arc;

use dashmap::DashMap;

use crate::storage::{ObjectStore, StorageError};

/// Object store held entirely in memory, shared between clones.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<DashMap<String, Vec<u8>>>
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new())
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

impl ObjectStore for MemoryObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys: Vec<String> = self.objects.iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();

        keys.sort();

        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.objects.get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        if key.is_empty() || key.ends_with('/') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        self.objects.insert(key.to_string(), bytes);

        Ok(())
    }

    fn move_object(&self, from: &str, to: &str) -> Result<(), StorageError> {
        if to.is_empty() || to.ends_with('/') {
            return Err(StorageError::InvalidKey(to.to_string()));
        }

        let (_, bytes) = self.objects.remove(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;

        self.objects.insert(to.to_string(), bytes);

        Ok(())
    }
}
