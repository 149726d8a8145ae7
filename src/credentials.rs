//! Fixed credential material, loaded exactly once at process start.

use std::path::Path;

use serde::Deserialize;

use crate::Error;
use crate::secret::SecretString;

/// The process secret: an argon2 password hash for the one-shot code check
/// and a raw session token for cookie validation.
///
/// Immutable after load. There is no hot reload; changing the file requires
/// a restart.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// PHC-format argon2 hash of the shared secret code.
    pub password_hash: SecretString,
    /// The single valid session value for the whole system.
    pub session_token: SecretString,
}

impl Credentials {
    /// Reads credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file is missing, unreadable, malformed,
    /// or carries empty fields. Callers treat this as startup-fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read credentials file {}: {e}",
                path.display()
            ))
        })?;

        let credentials: Credentials = serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("malformed credentials file: {e}")))?;

        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.password_hash.is_empty() {
            return Err(Error::Config("password_hash must not be empty".to_owned()));
        }
        if self.session_token.is_empty() {
            return Err(Error::Config("session_token must not be empty".to_owned()));
        }
        Ok(())
    }
}
