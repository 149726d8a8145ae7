//! Process configuration resolved from the environment at startup.
//!
//! Resolved once into an owned struct and passed by injection; nothing
//! reads the environment after boot.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::Error;
use crate::session::SessionConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address. `ALCOVE_ADDR`, default `127.0.0.1:3000`.
    pub addr: SocketAddr,
    /// Root directory for all persisted state. `ALCOVE_DATA_DIR`,
    /// default `data`.
    pub data_dir: PathBuf,
    /// Credentials file. `ALCOVE_CREDENTIALS`, default
    /// `<data_dir>/credentials.json`.
    pub credentials_path: PathBuf,
    /// Trusted frontend origin for the wishlist surface.
    /// `ALCOVE_WISHLIST_ORIGIN`; unset means no cross-origin access.
    pub wishlist_origin: Option<String>,
    /// Trusted frontend origin for the tasks surface.
    /// `ALCOVE_TASKS_ORIGIN`; unset means no cross-origin access.
    pub tasks_origin: Option<String>,
    /// Whether the session cookie carries the `Secure` attribute.
    /// `ALCOVE_COOKIE_SECURE`, default true; disable only for local
    /// plain-HTTP development.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Resolves configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a set variable fails to parse.
    pub fn from_env() -> Result<Self, Error> {
        let addr = env_or("ALCOVE_ADDR", "127.0.0.1:3000")
            .parse()
            .map_err(|e| Error::Config(format!("invalid ALCOVE_ADDR: {e}")))?;

        let data_dir = PathBuf::from(env_or("ALCOVE_DATA_DIR", "data"));

        let credentials_path = std::env::var("ALCOVE_CREDENTIALS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("credentials.json"));

        let cookie_secure = env_or("ALCOVE_COOKIE_SECURE", "true")
            .parse()
            .map_err(|e| Error::Config(format!("invalid ALCOVE_COOKIE_SECURE: {e}")))?;

        Ok(Self {
            addr,
            data_dir,
            credentials_path,
            wishlist_origin: std::env::var("ALCOVE_WISHLIST_ORIGIN").ok(),
            tasks_origin: std::env::var("ALCOVE_TASKS_ORIGIN").ok(),
            cookie_secure,
        })
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("purchases.txt")
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.data_dir.join("tasks")
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cookie_secure: self.cookie_secure,
            ..Default::default()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
