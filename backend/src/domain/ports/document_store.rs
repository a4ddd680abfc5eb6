//! Driven port for the flat-file document store.
//!
//! The store is the document index: there is no cache in front of it, so
//! every call observes whatever is on disk at that moment. Concurrent writers
//! are not coordinated; the last write to reach the filesystem wins.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::domain::DocumentName;

/// Errors surfaced by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentStoreError {
    /// No document with this name exists under the root.
    #[error("document {name} not found")]
    NotFound { name: String },
    /// The backing storage failed.
    #[error("document store i/o failed: {message}")]
    Io { message: String },
}

impl DocumentStoreError {
    /// Helper for missing documents.
    pub fn not_found(name: &DocumentName) -> Self {
        Self::NotFound {
            name: name.as_str().to_owned(),
        }
    }

    /// Helper for storage failures.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Enumerate, read, write and delete documents under one root.
pub trait DocumentStore: Send + Sync {
    /// Every document directly under the root, in enumeration order.
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError>;

    /// Whether a document with `name` exists.
    fn exists(&self, name: &DocumentName) -> bool;

    /// Full contents of `name`.
    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError>;

    /// Create or fully overwrite `name`.
    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError>;

    /// Create `name` with no content, truncating any existing document.
    fn create_empty(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        self.write(name, &[])
    }

    /// Remove `name`.
    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError>;
}

/// In-memory store used by service tests and local experiments.
///
/// Listing order is the name order of the underlying map.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<BTreeMap<DocumentName, Vec<u8>>>,
}

impl InMemoryDocumentStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_documents<T>(&self, f: impl FnOnce(&mut BTreeMap<DocumentName, Vec<u8>>) -> T) -> T {
        let mut guard = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError> {
        Ok(self.with_documents(|docs| docs.keys().cloned().collect()))
    }

    fn exists(&self, name: &DocumentName) -> bool {
        self.with_documents(|docs| docs.contains_key(name))
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError> {
        self.with_documents(|docs| docs.get(name).cloned())
            .ok_or_else(|| DocumentStoreError::not_found(name))
    }

    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError> {
        self.with_documents(|docs| docs.insert(name.clone(), content.to_vec()));
        Ok(())
    }

    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        self.with_documents(|docs| docs.remove(name))
            .map(drop)
            .ok_or_else(|| DocumentStoreError::not_found(name))
    }
}
