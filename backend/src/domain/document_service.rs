//! Document use-cases on top of the [`DocumentStore`] port.
//!
//! Handlers pass raw path and form values; this service applies the naming
//! rules and turns port failures into domain errors carrying the message a
//! reader should see.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::error;

use super::ports::{DocumentStore, DocumentStoreError};
use super::{Document, DocumentName, DocumentNameError, Error, MAX_NAME_BYTES};

/// Application service for listing, reading and mutating documents.
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

/// `raw` cut to [`MAX_NAME_BYTES`] so the message fits in a session cookie.
fn echoed_name(raw: &str) -> Cow<'_, str> {
    if raw.len() <= MAX_NAME_BYTES {
        return Cow::Borrowed(raw);
    }
    let mut end = MAX_NAME_BYTES;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", &raw[..end]))
}

fn does_not_exist(raw: &str) -> Error {
    Error::not_found(format!("{} does not exist.", echoed_name(raw)))
}

fn map_store_error(raw: &str, err: DocumentStoreError) -> Error {
    match err {
        DocumentStoreError::NotFound { .. } => does_not_exist(raw),
        DocumentStoreError::Io { message } => {
            error!(document = raw, %message, "document store failure");
            Error::internal(format!("document store failure: {message}"))
        }
    }
}

/// Resolve a name taken from a URL; anything unsafe simply does not exist.
fn existing_name(raw: &str) -> Result<DocumentName, Error> {
    DocumentName::parse(raw).map_err(|_| does_not_exist(raw))
}

impl DocumentService {
    /// Wrap a store adapter.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Names of every document, in store enumeration order.
    pub fn list(&self) -> Result<Vec<DocumentName>, Error> {
        self.store.list().map_err(|err| map_store_error("document index", err))
    }

    /// Whether `raw` names an existing document.
    #[must_use]
    pub fn exists(&self, raw: &str) -> bool {
        DocumentName::parse(raw).is_ok_and(|name| self.store.exists(&name))
    }

    /// Read a document by the name given in the request.
    ///
    /// # Errors
    /// [`Error::not_found`] with `"<name> does not exist."` when the document
    /// is missing or the name is not a valid document name.
    pub fn open(&self, raw: &str) -> Result<Document, Error> {
        let name = existing_name(raw)?;
        let content = self
            .store
            .read(&name)
            .map_err(|err| map_store_error(raw, err))?;
        Ok(Document::new(name, content))
    }

    /// Create an empty document from a name typed into the creation form.
    ///
    /// The name is trimmed and defaults to `.txt`. An existing document with
    /// the resulting name is truncated.
    ///
    /// # Errors
    /// [`Error::invalid_request`] when the name is blank or unsafe.
    pub fn create(&self, raw: &str) -> Result<DocumentName, Error> {
        let name = DocumentName::for_new_document(raw)
            .map_err(|err: DocumentNameError| Error::invalid_request(err.to_string()))?;
        self.store
            .create_empty(&name)
            .map_err(|err| map_store_error(name.as_str(), err))?;
        Ok(name)
    }

    /// Replace a document's content, creating it if needed.
    pub fn save(&self, raw: &str, content: &[u8]) -> Result<DocumentName, Error> {
        let name = existing_name(raw)?;
        self.store
            .write(&name, content)
            .map_err(|err| map_store_error(raw, err))?;
        Ok(name)
    }

    /// Delete a document.
    ///
    /// # Errors
    /// [`Error::not_found`] when there is nothing to delete.
    pub fn delete(&self, raw: &str) -> Result<DocumentName, Error> {
        let name = existing_name(raw)?;
        self.store
            .delete(&name)
            .map_err(|err| map_store_error(raw, err))?;
        Ok(name)
    }
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService").finish_non_exhaustive()
    }
}
