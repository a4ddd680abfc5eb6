//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CMS_*` environment variables or a
//! configuration file, in that order of precedence.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CREDENTIALS_PATH: &str = "user_info.yaml";
const DEFAULT_HOST: &str = "0.0.0.0";

/// Store location, credential table and listener address.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CMS")]
pub struct AppSettings {
    /// Directory whose files are the documents.
    pub data_dir: Option<PathBuf>,
    /// YAML file mapping usernames to password hashes.
    pub credentials_path: Option<PathBuf>,
    /// Interface to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
}

impl AppSettings {
    /// Configured store root, falling back to `data`.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Configured credential table, falling back to `user_info.yaml`.
    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        self.credentials_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CREDENTIALS_PATH))
    }

    /// Configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, 8080 unless overridden.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve host and port to the first matching socket address.
    ///
    /// # Errors
    /// Returns [`io::Error`] when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address for host {}", self.host()),
                )
            })
    }
}
