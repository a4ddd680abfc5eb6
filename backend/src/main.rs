//! CMS entry-point: loads settings, opens the document store and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cms::config::AppSettings;
use cms::domain::{AuthGate, DocumentService};
use cms::inbound::http::health::HealthState;
use cms::inbound::http::session_config::{BuildMode, session_settings_from_env};
use cms::inbound::http::state::HttpState;
use cms::outbound::credentials::{HashPasswordVerifier, YamlCredentialStore};
use cms::outbound::fs::CapStdDocumentStore;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("invalid configuration: {err}")))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let store = CapStdDocumentStore::open(settings.data_dir())?;
    info!(root = %settings.data_dir().display(), "document store opened");

    let credentials = YamlCredentialStore::new(settings.credentials_path());
    if !credentials.path().is_file() {
        warn!(
            path = %credentials.path().display(),
            "credential table not found; every sign-in will fail until it exists"
        );
    }

    let http_state = HttpState::new(
        DocumentService::new(Arc::new(store)),
        AuthGate::new(Arc::new(credentials), Arc::new(HashPasswordVerifier)),
    );
    let config = ServerConfig::new(session, settings.bind_addr()?);
    let bind_addr = config.bind_addr();

    let server = create_server(
        web::Data::new(HealthState::new()),
        web::Data::new(http_state),
        config,
    )?;
    info!(%bind_addr, "listening");
    server.await
}
