//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! domain services and stay testable against in-memory ports.

use crate::domain::{AuthGate, DocumentService, MarkdownRenderer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Document use-cases over the configured store.
    pub documents: DocumentService,
    /// Credential checks and session identity rules.
    pub auth: AuthGate,
    /// Renderer for `.md` documents.
    pub markdown: MarkdownRenderer,
}

impl HttpState {
    /// Bundle services with the default markdown renderer.
    pub fn new(documents: DocumentService, auth: AuthGate) -> Self {
        Self {
            documents,
            auth,
            markdown: MarkdownRenderer::default(),
        }
    }
}
