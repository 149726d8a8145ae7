//! Request authorization.
//!
//! `AuthGate` sits between the endpoint layer and the stores. Two modes:
//! a one-shot secret-code check (argon2, deliberately slow) for the
//! wishlist write and login, and a session-cookie check delegated to
//! [`SessionManager`] for the task endpoints. The comparison strategy is
//! the only thing a future multi-user scheme would need to swap.

use crate::credentials::Credentials;
use crate::session::SessionManager;
use crate::{Error, crypto};

#[derive(Debug, Clone)]
pub struct AuthGate {
    credentials: Credentials,
    sessions: SessionManager,
}

impl AuthGate {
    pub fn new(credentials: Credentials, sessions: SessionManager) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Verifies a caller-supplied plaintext code against the stored hash.
    ///
    /// Runs on the blocking pool: argon2 verification takes tens of
    /// milliseconds by construction and must not stall the executor.
    ///
    /// # Errors
    ///
    /// `Error::Unauthorized` on mismatch or malformed input; the two are
    /// indistinguishable to the caller.
    pub async fn verify_code(&self, code: &str) -> Result<(), Error> {
        let code = code.to_owned();
        let hash = self.credentials.password_hash.clone();

        let ok = tokio::task::spawn_blocking(move || {
            crypto::verify_code(&code, hash.expose_secret())
        })
        .await
        .map_err(|e| Error::Internal(format!("verification task failed: {e}")))?;

        if ok { Ok(()) } else { Err(Error::Unauthorized) }
    }

    /// Session mode: authorize iff a presented cookie value validates.
    ///
    /// # Errors
    ///
    /// `Error::Unauthorized` when the cookie is absent or invalid.
    pub fn authorize_session(&self, presented: Option<&str>) -> Result<(), Error> {
        match presented {
            Some(value) if self.sessions.validate(value) => Ok(()),
            _ => Err(Error::Unauthorized),
        }
    }
}
