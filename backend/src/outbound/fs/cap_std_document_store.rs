//! Document store backed by a directory handle.
//!
//! All access goes through a `cap_std::fs::Dir` opened on the store root, so
//! even a name that slipped past validation cannot resolve outside it. Each
//! call goes straight to the filesystem; nothing is cached between calls.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::DocumentName;
use crate::domain::ports::{DocumentStore, DocumentStoreError};

/// [`DocumentStore`] over the files directly inside one directory.
#[derive(Debug)]
pub struct CapStdDocumentStore {
    root: Dir,
}

fn io_error(action: &str, name: &DocumentName, err: &io::Error) -> DocumentStoreError {
    DocumentStoreError::io(format!("{action} {name}: {err}"))
}

impl CapStdDocumentStore {
    /// Open the store at `root`, creating the directory if it is missing.
    ///
    /// # Errors
    /// Propagates [`io::Error`] when the directory cannot be created or opened.
    ///
    /// # Examples
    /// ```
    /// use cms::domain::ports::DocumentStore;
    /// use cms::outbound::fs::CapStdDocumentStore;
    ///
    /// let dir = tempfile::tempdir()?;
    /// let store = CapStdDocumentStore::open(dir.path().join("data"))?;
    /// assert!(store.list().expect("listing").is_empty());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self { root: dir })
    }
}

impl DocumentStore for CapStdDocumentStore {
    fn list(&self) -> Result<Vec<DocumentName>, DocumentStoreError> {
        let entries = self
            .root
            .entries()
            .map_err(|err| DocumentStoreError::io(format!("list store root: {err}")))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|err| DocumentStoreError::io(format!("read dir entry: {err}")))?;
            let file_name = entry.file_name();
            let is_file = entry.file_type().is_ok_and(|kind| kind.is_file());
            let parsed = file_name
                .to_str()
                .and_then(|raw| DocumentName::parse(raw).ok());
            match parsed {
                Some(name) if is_file => names.push(name),
                _ => debug!(entry = ?file_name, "skipping non-document entry"),
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &DocumentName) -> bool {
        self.root.is_file(name)
    }

    fn read(&self, name: &DocumentName) -> Result<Vec<u8>, DocumentStoreError> {
        if !self.root.is_file(name) {
            return Err(DocumentStoreError::not_found(name));
        }
        self.root.read(name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DocumentStoreError::not_found(name),
            _ => io_error("read", name, &err),
        })
    }

    fn write(&self, name: &DocumentName, content: &[u8]) -> Result<(), DocumentStoreError> {
        self.root
            .write(name, content)
            .map_err(|err| io_error("write", name, &err))
    }

    fn delete(&self, name: &DocumentName) -> Result<(), DocumentStoreError> {
        self.root.remove_file(name).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DocumentStoreError::not_found(name),
            _ => io_error("delete", name, &err),
        })
    }
}
