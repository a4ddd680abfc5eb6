//! Authentication primitives: sign-in credentials and the auth gate.
//!
//! The gate owns the two rules every mutating route depends on: who counts as
//! signed in, and how a sign-in attempt is judged. It never distinguishes an
//! unknown user from a wrong password.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info};
use zeroize::Zeroizing;

use super::Error;
use super::ports::{CredentialStore, PasswordVerifier, SessionIdentity};

/// Message shown for any failed sign-in attempt.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

/// Message shown when a mutating action is attempted while signed out.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "You must be signed in to do that.";

/// Username and password as submitted by the sign-in form.
///
/// The password is wiped from memory when the credentials are dropped.
///
/// # Examples
/// ```
/// use cms::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin", "secret");
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Wrap raw form values. Blank values are allowed and simply never match.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username exactly as submitted.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as submitted.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credential verification and session identity rules.
#[derive(Clone)]
pub struct AuthGate {
    credentials: Arc<dyn CredentialStore>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl AuthGate {
    /// Combine a credential table with a password verifier.
    pub fn new(credentials: Arc<dyn CredentialStore>, verifier: Arc<dyn PasswordVerifier>) -> Self {
        Self {
            credentials,
            verifier,
        }
    }

    /// Check `credentials` against the table.
    ///
    /// Unknown users verify as `false`. A table that cannot be loaded is an
    /// internal error rather than a failed sign-in.
    pub fn verify(&self, credentials: &LoginCredentials) -> Result<bool, Error> {
        let stored = self
            .credentials
            .password_hash(credentials.username())
            .map_err(|err| {
                error!(error = %err, "credential lookup failed");
                Error::internal(format!("credential lookup failed: {err}"))
            })?;
        Ok(stored.is_some_and(|hash| self.verifier.verify(credentials.password(), &hash)))
    }

    /// Verify `credentials` and return the username to record.
    ///
    /// Blocking: password hashing is deliberately slow.
    pub fn authenticate(&self, credentials: &LoginCredentials) -> Result<String, Error> {
        if self.verify(credentials)? {
            Ok(credentials.username().to_owned())
        } else {
            Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE))
        }
    }

    /// Full sign-in: verify, then record the identity on `session`.
    ///
    /// On failure the session is left exactly as it was.
    pub fn sign_in<S>(&self, session: &S, credentials: &LoginCredentials) -> Result<(), Error>
    where
        S: SessionIdentity + ?Sized,
    {
        let username = self.authenticate(credentials)?;
        Self::record_sign_in(session, &username)
    }

    /// Record an already authenticated `username` on `session`.
    pub fn record_sign_in<S>(session: &S, username: &str) -> Result<(), Error>
    where
        S: SessionIdentity + ?Sized,
    {
        session.set_signed_in_user(username)?;
        info!(user = username, "signed in");
        Ok(())
    }

    /// Clear the signed-in identity, whether or not one was present.
    pub fn sign_out<S>(session: &S)
    where
        S: SessionIdentity + ?Sized,
    {
        session.clear_signed_in_user();
    }

    /// `true` iff the session holds a non-empty username.
    pub fn is_signed_in<S>(session: &S) -> bool
    where
        S: SessionIdentity + ?Sized,
    {
        session
            .signed_in_user()
            .is_some_and(|user| !user.is_empty())
    }

    /// Fail with [`Error::access_denied`] unless someone is signed in.
    pub fn require_signed_in<S>(session: &S) -> Result<(), Error>
    where
        S: SessionIdentity + ?Sized,
    {
        if Self::is_signed_in(session) {
            Ok(())
        } else {
            Err(Error::access_denied(SIGN_IN_REQUIRED_MESSAGE))
        }
    }
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{CredentialStoreError, InMemorySession, StaticCredentialStore};
    use rstest::{fixture, rstest};

    /// Plaintext comparison so tests stay fast and readable.
    struct PlainVerifier;

    impl PasswordVerifier for PlainVerifier {
        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            hash.strip_prefix("plain:") == Some(plaintext)
        }
    }

    struct BrokenStore;

    impl CredentialStore for BrokenStore {
        fn password_hash(&self, _username: &str) -> Result<Option<String>, CredentialStoreError> {
            Err(CredentialStoreError::unavailable("disk on fire"))
        }
    }

    #[fixture]
    fn gate() -> AuthGate {
        AuthGate::new(
            Arc::new(StaticCredentialStore::new([("admin", "plain:secret")])),
            Arc::new(PlainVerifier),
        )
    }

    #[rstest]
    #[case("admin", "secret", true)]
    #[case("admin", "wrongpw", false)]
    #[case("rudeboy", "secret", false)]
    #[case("", "", false)]
    fn verify_checks_table(
        gate: AuthGate,
        #[case] user: &str,
        #[case] pw: &str,
        #[case] expected: bool,
    ) {
        let verified = gate
            .verify(&LoginCredentials::new(user, pw))
            .expect("table readable");
        assert_eq!(verified, expected);
    }

    #[rstest]
    fn successful_sign_in_records_user(gate: AuthGate) {
        let session = InMemorySession::new();
        gate.sign_in(&session, &LoginCredentials::new("admin", "secret"))
            .expect("sign in");
        assert_eq!(session.signed_in_user().as_deref(), Some("admin"));
        assert!(AuthGate::is_signed_in(&session));
    }

    #[rstest]
    #[case("admin", "wrongpw")]
    #[case("rudeboy", "secret")]
    fn failed_sign_in_is_generic_and_leaves_session(
        gate: AuthGate,
        #[case] user: &str,
        #[case] pw: &str,
    ) {
        let session = InMemorySession::new();
        let err = gate
            .sign_in(&session, &LoginCredentials::new(user, pw))
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidCredentials);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
        assert!(session.signed_in_user().is_none());
    }

    #[rstest]
    fn failed_sign_in_keeps_previous_identity(gate: AuthGate) {
        let session = InMemorySession::new();
        gate.sign_in(&session, &LoginCredentials::new("admin", "secret"))
            .expect("sign in");
        let _ = gate.sign_in(&session, &LoginCredentials::new("admin", "nope"));
        assert_eq!(session.signed_in_user().as_deref(), Some("admin"));
    }

    #[rstest]
    fn sign_out_is_unconditional() {
        let session = InMemorySession::new();
        AuthGate::sign_out(&session);
        assert!(!AuthGate::is_signed_in(&session));

        session.set_signed_in_user("admin").expect("set");
        AuthGate::sign_out(&session);
        assert!(session.signed_in_user().is_none());
    }

    #[rstest]
    fn empty_username_does_not_count_as_signed_in() {
        let session = InMemorySession::new();
        session.set_signed_in_user("").expect("set");
        assert!(!AuthGate::is_signed_in(&session));
        let err = AuthGate::require_signed_in(&session).expect_err("denied");
        assert_eq!(err.code(), ErrorCode::AccessDenied);
        assert_eq!(err.message(), SIGN_IN_REQUIRED_MESSAGE);
    }

    #[rstest]
    fn require_signed_in_passes_for_signed_in_session() {
        let session = InMemorySession::new();
        session.set_signed_in_user("admin").expect("set");
        assert!(AuthGate::require_signed_in(&session).is_ok());
    }

    #[rstest]
    fn unreadable_table_is_internal() {
        let gate = AuthGate::new(Arc::new(BrokenStore), Arc::new(PlainVerifier));
        let err = gate
            .verify(&LoginCredentials::new("admin", "secret"))
            .expect_err("store broken");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
