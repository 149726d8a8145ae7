//! Secret comparison primitives: argon2 code verification, token
//! generation, and constant-time equality.

use argon2::{Argon2, PasswordVerifier};
use password_hash::{PasswordHash, PasswordHasher as _, SaltString};
use rand::rngs::OsRng;

use crate::Error;

/// Default token length in characters.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Verifies a plaintext code against a PHC-format argon2 hash.
///
/// A malformed hash string and a mismatched code are indistinguishable to
/// the caller: both come back as `false`. Authorization failures must never
/// escalate into server errors.
pub fn verify_code(code: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        log::warn!(target: "alcove::crypto", "msg=\"stored hash is not valid PHC format\"");
        return false;
    };

    Argon2::default()
        .verify_password(code.as_bytes(), &parsed)
        .is_ok()
}

/// Hashes a code with argon2id for storage in the credentials file.
///
/// # Errors
///
/// Returns `Error::Internal` if hashing fails.
pub fn hash_code(code: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(code.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| Error::Internal("failed to hash code".to_owned()))
}

/// Generates a random alphanumeric token.
pub fn generate_token(length: usize) -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(rng.sample(rand::distributions::Alphanumeric)))
        .collect()
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
