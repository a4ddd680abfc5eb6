//! Driven port for the credential table.
//!
//! Adapters load the table on every lookup so edits to the backing file take
//! effect without a restart. The domain never writes credentials.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors surfaced by credential store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialStoreError {
    /// The table could not be read.
    #[error("credential table unavailable: {message}")]
    Unavailable { message: String },
    /// The table was read but is not a username to hash mapping.
    #[error("credential table malformed: {message}")]
    Malformed { message: String },
}

impl CredentialStoreError {
    /// Helper for read failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for parse failures.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Username to password-hash lookup.
pub trait CredentialStore: Send + Sync {
    /// Stored hash for `username`, or `None` when the user is unknown.
    fn password_hash(&self, username: &str) -> Result<Option<String>, CredentialStoreError>;
}

/// Fixed in-memory table for tests.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentialStore {
    hashes: BTreeMap<String, String>,
}

impl StaticCredentialStore {
    /// Build a table from `(username, hash)` pairs.
    pub fn new<I, U, H>(entries: I) -> Self
    where
        I: IntoIterator<Item = (U, H)>,
        U: Into<String>,
        H: Into<String>,
    {
        Self {
            hashes: entries
                .into_iter()
                .map(|(user, hash)| (user.into(), hash.into()))
                .collect(),
        }
    }
}

impl CredentialStore for StaticCredentialStore {
    fn password_hash(&self, username: &str) -> Result<Option<String>, CredentialStoreError> {
        Ok(self.hashes.get(username).cloned())
    }
}
