mod errors;
mod local_store;
#[cfg(test)]
mod memory_store;

pub use errors::StorageError;
pub use local_store::LocalObjectStore;
#[cfg(test)]
pub use memory_store::MemoryObjectStore;

/// Flat key/value object storage addressed by `/` separated keys.
pub trait ObjectStore: Send + Sync + 'static {
    /// Returns every key starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
    /// Relocates an object, the source key no longer exists afterwards.
    fn move_object(&self, from: &str, to: &str) -> Result<(), StorageError>;
}
