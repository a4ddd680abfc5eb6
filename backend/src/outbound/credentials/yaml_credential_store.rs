//! Credential table stored as a YAML mapping of username to password hash.
//!
//! ```yaml
//! admin: $2a$12$...
//! editor: $argon2id$v=19$m=19456,t=2,p=1$...
//! ```
//!
//! The file is re-read on every lookup.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// [`CredentialStore`] reading a YAML file.
#[derive(Debug, Clone)]
pub struct YamlCredentialStore {
    path: PathBuf,
}

impl YamlCredentialStore {
    /// Table at `path`. The file is not touched until the first lookup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> io::Result<Vec<u8>> {
        let (parent, file_name) = parent_and_file_name(&self.path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read(Path::new(&file_name))
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CredentialStoreError> {
        let bytes = self.read_table().map_err(|err| {
            CredentialStoreError::unavailable(format!("{}: {err}", self.path.display()))
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_yaml::from_slice(&bytes).map_err(|err| {
            CredentialStoreError::malformed(format!("{}: {err}", self.path.display()))
        })
    }
}

fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "credential path must name a file",
        )
    })?;
    Ok((parent, file_name.to_os_string()))
}

impl CredentialStore for YamlCredentialStore {
    fn password_hash(&self, username: &str) -> Result<Option<String>, CredentialStoreError> {
        let mut table = self.load()?;
        Ok(table.remove(username))
    }
}
