//! Key-value storage backends for the credential vault
//!
//! Entries are grouped into namespaces, each one a flat map of JSON values. Every
//! [`KeyValueStore::edit`] is atomic for its namespace: readers observe the namespace
//! either before or after the whole edit.

use crate::models::auth::VaultError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Contents of one namespace
pub type Entries = BTreeMap<String, Value>;

/// Persisted key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read a namespace; a namespace that was never written is empty
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read or decoded
    fn load(&self, namespace: &str) -> Result<Entries, VaultError>;

    /// Apply `edit` to a namespace and persist the result
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace cannot be read, encoded or written
    fn edit(&self, namespace: &str, edit: &mut dyn FnMut(&mut Entries)) -> Result<(), VaultError>;
}

/// Process-lifetime storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: Mutex<HashMap<String, Entries>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, namespace: &str) -> Result<Entries, VaultError> {
        Ok(self
            .namespaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(namespace)
            .cloned()
            .unwrap_or_default())
    }

    fn edit(&self, namespace: &str, edit: &mut dyn FnMut(&mut Entries)) -> Result<(), VaultError> {
        let mut namespaces = self
            .namespaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        edit(namespaces.entry(namespace.to_string()).or_default());
        Ok(())
    }
}

/// One JSON document per namespace under a directory
///
/// Writes go to a temporary file that is renamed over the document, so a crash mid-write
/// leaves the previous version intact.
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn document_path(&self, namespace: &str) -> PathBuf {
        self.directory.join(format!("{namespace}.json"))
    }

    fn read_document(path: &Path) -> Result<Entries, VaultError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, namespace: &str) -> Result<Entries, VaultError> {
        Self::read_document(&self.document_path(namespace))
    }

    fn edit(&self, namespace: &str, edit: &mut dyn FnMut(&mut Entries)) -> Result<(), VaultError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.document_path(namespace);
        let mut entries = Self::read_document(&path)?;
        edit(&mut entries);

        fs::create_dir_all(&self.directory)?;
        let temp_path = self.directory.join(format!("{namespace}.json.tmp"));
        fs::write(&temp_path, serde_json::to_vec_pretty(&entries)?)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}
