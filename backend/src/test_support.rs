//! Test utilities shared by unit tests and the `tests/` suites.
//!
//! Compiled only with the `test-support` feature. A [`TestSite`] is a
//! throwaway document root plus a credential table holding one user, wired to
//! the real filesystem adapters.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use tempfile::TempDir;

use crate::domain::{AuthGate, DocumentService};
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::{HashPasswordVerifier, YamlCredentialStore};
use crate::outbound::fs::CapStdDocumentStore;

pub use crate::inbound::http::test_utils::test_session_middleware;

/// Username present in every [`TestSite`] credential table.
pub const TEST_USER: &str = "admin";
/// Password for [`TEST_USER`].
pub const TEST_PASSWORD: &str = "secret";

/// Cheapest bcrypt cost, so fixtures do not slow the suite down.
const FIXTURE_BCRYPT_COST: u32 = 4;

/// Temporary store root and credential table.
#[derive(Debug)]
pub struct TestSite {
    _dir: TempDir,
    data_dir: PathBuf,
    credentials_path: PathBuf,
    documents: Dir,
}

impl TestSite {
    /// Create an empty site whose credential table knows [`TEST_USER`].
    ///
    /// # Errors
    /// Returns [`io::Error`] when the temporary directory cannot be prepared.
    ///
    /// # Examples
    /// ```
    /// use cms::test_support::TestSite;
    ///
    /// let site = TestSite::new()?;
    /// site.write_document("about.md", b"# About")?;
    /// assert!(site.has_document("about.md"));
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let root = Dir::open_ambient_dir(dir.path(), ambient_authority())?;
        root.create_dir("data")?;
        let documents = root.open_dir("data")?;

        let hash =
            bcrypt::hash(TEST_PASSWORD, FIXTURE_BCRYPT_COST).map_err(io::Error::other)?;
        root.write("user_info.yaml", format!("{TEST_USER}: \"{hash}\"\n"))?;

        Ok(Self {
            data_dir: dir.path().join("data"),
            credentials_path: dir.path().join("user_info.yaml"),
            _dir: dir,
            documents,
        })
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// YAML credential table.
    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Write a document directly, bypassing the application.
    ///
    /// # Errors
    /// Propagates filesystem failures.
    pub fn write_document(&self, name: &str, content: &[u8]) -> io::Result<()> {
        self.documents.write(name, content)
    }

    /// Read a document directly.
    ///
    /// # Errors
    /// Propagates filesystem failures, including a missing file.
    pub fn read_document(&self, name: &str) -> io::Result<Vec<u8>> {
        self.documents.read(name)
    }

    /// Whether a regular file called `name` exists in the store root.
    #[must_use]
    pub fn has_document(&self, name: &str) -> bool {
        self.documents.is_file(name)
    }

    /// Document service over the site's store root.
    ///
    /// # Errors
    /// Propagates failures opening the store root.
    pub fn document_service(&self) -> io::Result<DocumentService> {
        let store = CapStdDocumentStore::open(&self.data_dir)?;
        Ok(DocumentService::new(Arc::new(store)))
    }

    /// Auth gate over the site's credential table.
    #[must_use]
    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(
            Arc::new(YamlCredentialStore::new(&self.credentials_path)),
            Arc::new(HashPasswordVerifier),
        )
    }

    /// Handler state wired to this site.
    ///
    /// # Errors
    /// Propagates failures opening the store root.
    pub fn http_state(&self) -> io::Result<HttpState> {
        Ok(HttpState::new(self.document_service()?, self.auth_gate()))
    }
}
