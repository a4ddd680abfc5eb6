//! Credential table and password verification adapters.

mod password;
mod yaml_credential_store;

pub use password::HashPasswordVerifier;
pub use yaml_credential_store::YamlCredentialStore;
