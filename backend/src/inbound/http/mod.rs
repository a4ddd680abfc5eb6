//! HTTP inbound adapter: HTML pages and form posts over the document service.

pub mod documents;
pub mod error;
pub mod health;
pub mod pages;
pub mod redirect;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
