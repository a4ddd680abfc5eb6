//! Driven port for password hash comparison.

/// Compare a plaintext password against a stored salted hash.
///
/// Implementations must be constant-time with respect to the plaintext and
/// must treat any hash they cannot parse as a mismatch.
pub trait PasswordVerifier: Send + Sync {
    /// `true` iff `plaintext` matches `hash`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
