use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};

use crate::storage::{ObjectStore, StorageError};

/// Object store rooted at a local directory, each key maps to a file path.
pub struct LocalObjectStore {
    root: PathBuf
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let is_plain = relative.components().all(|component| matches!(component, Component::Normal(_)));

        if key.is_empty() || key.ends_with('/') || !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.root.join(relative))
    }

    fn collect(&self, directory: &Path, keys: &mut Vec<String>) -> Result<(), StorageError> {
        for entry in fs::read_dir(directory)? {
            let path = entry?.path();

            if path.is_dir() {
                self.collect(&path, keys)?;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                let components = relative.components()
                    .map(|component| component.as_os_str().to_str())
                    .collect::<Option<Vec<_>>>();

                match components {
                    Some(components) => keys.push(components.join("/")),
                    None => warn!("Skipping object with a non UTF-8 path [{}]", path.display())
                }
            }
        }

        Ok(())
    }
}

impl ObjectStore for LocalObjectStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();

        //NOTE: Only the directory part of the prefix is walked, the remainder filters file names
        let directory = match prefix.rsplit_once('/') {
            Some((parent, _)) => self.resolve(parent)?,
            None => self.root.clone()
        };

        if directory.is_dir() {
            self.collect(&directory, &mut keys)?;
        }

        keys.retain(|key| key.starts_with(prefix));
        keys.sort();

        trace!("Listed {} objects under prefix [{prefix}]", keys.len());

        Ok(keys)
    }

    fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(key)?;

        fs::read(&path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::Io(error)
        })
    }

    fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, bytes)?;

        Ok(())
    }

    fn move_object(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let source = self.resolve(from)?;
        let destination = self.resolve(to)?;

        if !source.is_file() {
            return Err(StorageError::NotFound(from.to_string()));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::rename(source, destination)?;

        Ok(())
    }
}
