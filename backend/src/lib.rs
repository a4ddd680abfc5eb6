//! Flat-file CMS: a directory of text and markdown documents served over
//! HTTP, with editing gated behind a signed-in session.
//!
//! - [`domain`] holds naming rules, the auth gate and the use-cases.
//! - [`outbound`] adapts the filesystem and the credential table.
//! - [`inbound`] serves HTML pages and form posts with Actix.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use middleware::Trace;
