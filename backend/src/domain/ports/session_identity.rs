//! Port for the per-client session as seen by the auth gate.
//!
//! The session itself belongs to the inbound adapter (a signed cookie in the
//! HTTP server); the domain only reads and writes the signed-in identity.

use std::cell::RefCell;

use crate::domain::Error;

/// Signed-in identity slot of a client session.
pub trait SessionIdentity {
    /// Username currently signed in, if any.
    ///
    /// Adapters report unreadable or tampered state as `None`.
    fn signed_in_user(&self) -> Option<String>;

    /// Record `username` as signed in.
    fn set_signed_in_user(&self, username: &str) -> Result<(), Error>;

    /// Forget the signed-in identity; a no-op when nobody is signed in.
    fn clear_signed_in_user(&self);
}

/// Session held in memory, for domain tests and behaviour scenarios.
#[derive(Debug, Default)]
pub struct InMemorySession {
    user: RefCell<Option<String>>,
}

impl InMemorySession {
    /// Fresh, signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionIdentity for InMemorySession {
    fn signed_in_user(&self) -> Option<String> {
        self.user.borrow().clone()
    }

    fn set_signed_in_user(&self, username: &str) -> Result<(), Error> {
        *self.user.borrow_mut() = Some(username.to_owned());
        Ok(())
    }

    fn clear_signed_in_user(&self) {
        self.user.borrow_mut().take();
    }
}
