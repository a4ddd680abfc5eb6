//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! the signed-in username and the one-shot flash message shown on the next
//! rendered page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::SessionIdentity;

pub(crate) const USER_KEY: &str = "current_user";
pub(crate) const MESSAGE_KEY: &str = "message";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Queue a message for the next rendered page, replacing any pending one.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        self.0
            .insert(MESSAGE_KEY, message.into())
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return the pending message, if any.
    pub fn take_flash(&self) -> Option<String> {
        let message = match self.0.get::<String>(MESSAGE_KEY) {
            Ok(message) => message,
            Err(error) => {
                warn!("unreadable flash message in session cookie: {error}");
                None
            }
        };
        self.0.remove(MESSAGE_KEY);
        message
    }
}

impl SessionIdentity for SessionContext {
    fn signed_in_user(&self) -> Option<String> {
        match self.0.get::<String>(USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                warn!("invalid user in session cookie: {error}");
                None
            }
        }
    }

    fn set_signed_in_user(&self, username: &str) -> Result<(), Error> {
        self.0
            .insert(USER_KEY, username)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn clear_signed_in_user(&self) {
        self.0.remove(USER_KEY);
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
