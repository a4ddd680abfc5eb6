//! Salted adaptive password hash verification.
//!
//! bcrypt hashes (`$2a$`, `$2b$`, `$2x$`, `$2y$`) are checked with the
//! `bcrypt` crate so existing credential tables keep working. PHC strings for
//! Argon2 (`$argon2id$...`) are accepted as well. Anything else never matches.

use argon2::{Argon2, PasswordHash, PasswordVerifier as _};
use tracing::warn;

use crate::domain::ports::PasswordVerifier;

const BCRYPT_PREFIX: &str = "$2";
const ARGON2_PREFIX: &str = "$argon2";

/// [`PasswordVerifier`] dispatching on the stored hash format.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashPasswordVerifier;

impl HashPasswordVerifier {
    fn verify_bcrypt(plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or_else(|err| {
            warn!(error = %err, "stored bcrypt hash could not be parsed");
            false
        })
    }

    fn verify_argon2(plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                warn!(error = %err, "stored argon2 hash could not be parsed");
                false
            }
        }
    }
}

impl PasswordVerifier for HashPasswordVerifier {
    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if hash.starts_with(ARGON2_PREFIX) {
            Self::verify_argon2(plaintext, hash)
        } else if hash.starts_with(BCRYPT_PREFIX) {
            Self::verify_bcrypt(plaintext, hash)
        } else {
            warn!("stored password hash has an unrecognised format");
            false
        }
    }
}
