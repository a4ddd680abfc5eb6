//! Domain primitives, services and ports.
//!
//! Purpose: hold the document naming rules, the auth gate and the markdown
//! renderer without any knowledge of HTTP or the filesystem. Adapters live in
//! `inbound` and `outbound` and meet the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode - transport-agnostic failure type.
//! - DocumentName / Document / DocumentKind - document identity and content.
//! - DocumentService - list, open, create, save and delete use-cases.
//! - AuthGate / LoginCredentials - sign-in verification and session identity.
//! - MarkdownRenderer - markdown to HTML.
//! - TraceId - request correlation identifier.

pub mod auth;
pub mod document;
pub mod document_service;
pub mod error;
pub mod markdown;
pub mod ports;
pub mod trace_id;

pub use self::auth::{
    AuthGate, INVALID_CREDENTIALS_MESSAGE, LoginCredentials, SIGN_IN_REQUIRED_MESSAGE,
};
pub use self::document::{
    Document, DocumentKind, DocumentName, DocumentNameError, MAX_NAME_BYTES,
};
pub use self::document_service::DocumentService;
pub use self::error::{Error, ErrorCode};
pub use self::markdown::MarkdownRenderer;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
