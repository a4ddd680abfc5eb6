//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports are synchronous: every adapter call runs to completion or fails
//! immediately. HTTP handlers move them onto the blocking pool.

mod credential_store;
mod document_store;
mod password_verifier;
mod session_identity;

pub use credential_store::{CredentialStore, CredentialStoreError, StaticCredentialStore};
pub use document_store::{DocumentStore, DocumentStoreError, InMemoryDocumentStore};
pub use password_verifier::PasswordVerifier;
pub use session_identity::{InMemorySession, SessionIdentity};
