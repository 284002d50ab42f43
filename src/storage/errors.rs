use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object [{0}] was not found")]
    NotFound(String),
    #[error("Object key [{0}] is invalid")]
    InvalidKey(String),
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error)
}
