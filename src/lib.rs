pub mod api;
pub mod auth;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod secret;
pub mod session;
pub mod store;

pub use credentials::Credentials;
pub use secret::SecretString;

use std::fmt;

/// Crate-wide failure taxonomy.
///
/// Every failure path in the core is converted locally into one of these
/// variants; the API layer maps each variant to a status code and nothing
/// else crosses the process boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Missing or incorrect credential. Maps to 401.
    Unauthorized,
    /// The target of a delete does not exist. Maps to 404.
    NotFound,
    /// I/O or parse failure against the backing store. Maps to 500.
    Storage(String),
    /// Semantically malformed payload. Maps to 400.
    Validation(String),
    /// Startup configuration problem; fatal before the server binds.
    Config(String),
    /// Runtime failure outside the storage path. Maps to 500.
    Internal(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unauthorized => write!(f, "unauthorized"),
            Error::NotFound => write!(f, "not found"),
            Error::Storage(msg) => write!(f, "storage failure: {msg}"),
            Error::Validation(msg) => write!(f, "validation failure: {msg}"),
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}
