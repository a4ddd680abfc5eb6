//! Filesystem adapters.

mod cap_std_document_store;

pub use cap_std_document_store::CapStdDocumentStore;
