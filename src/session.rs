//! Cookie-based session issuance and validation.
//!
//! Single-tenant: there is exactly one valid session value for the whole
//! system, re-derived on every request by comparing the presented cookie
//! against the fixed server-side token. Logout clears the client cookie
//! only; with no server-side revocation list, a captured cookie value stays
//! usable within its TTL. Known limitation of the single-secret scheme.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Duration;
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite as CookieSameSite};

use crate::crypto::constant_time_eq;
use crate::secret::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    #[default]
    Lax,
    Strict,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_path: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub cookie_same_site: SameSite,
    pub session_lifetime: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            session_lifetime: Duration::days(7),
        }
    }
}

/// Issues and validates the opaque session credential.
///
/// The credential is the process session token itself, carried in the
/// cookie as base64 over a JSON string. Expiry is enforced by the cookie's
/// own max-age on the client; the server accepts any presented value equal
/// to the token.
#[derive(Debug, Clone)]
pub struct SessionManager {
    token: SecretString,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(token: SecretString, config: SessionConfig) -> Self {
        Self { token, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds the login cookie carrying the encoded session token.
    pub fn issue(&self) -> Cookie<'static> {
        let value = encode_cookie_value(self.token.expose_secret());
        build_session_cookie(value, &self.config)
    }

    /// True iff `presented` decodes to a non-empty string equal to the
    /// stored token. Undecodable or mismatched values are simply invalid,
    /// never an error.
    pub fn validate(&self, presented: &str) -> bool {
        let Some(candidate) = decode_cookie_value(presented) else {
            log::warn!(
                target: "alcove::session",
                "msg=\"undecodable session cookie\" cookie_prefix=\"{}...\"",
                presented.chars().take(8).collect::<String>()
            );
            return false;
        };

        if candidate.is_empty() {
            return false;
        }

        constant_time_eq(candidate.as_bytes(), self.token.expose_secret().as_bytes())
    }

    /// Builds the logout cookie that clears the client state.
    ///
    /// Client-side only: the token itself remains valid.
    pub fn revoke(&self) -> Cookie<'static> {
        build_removal_cookie(&self.config)
    }
}

/// Cookie value codec: JSON string layer first, then base64, so the value
/// survives any token charset and any cookie-unsafe byte.
fn encode_cookie_value(token: &str) -> String {
    // SAFETY: serializing a &str to a JSON string cannot fail.
    #[allow(clippy::expect_used)]
    let json = serde_json::to_string(token).expect("string serialization is infallible");
    BASE64.encode(json)
}

fn decode_cookie_value(raw: &str) -> Option<String> {
    let bytes = BASE64.decode(raw).ok()?;
    serde_json::from_slice::<String>(&bytes).ok()
}

fn build_session_cookie(value: String, config: &SessionConfig) -> Cookie<'static> {
    let same_site = match config.cookie_same_site {
        SameSite::None => CookieSameSite::None,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::Strict => CookieSameSite::Strict,
    };

    let max_age_secs = config.session_lifetime.num_seconds();

    Cookie::build((config.cookie_name.clone(), value))
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(same_site)
        .max_age(CookieDuration::seconds(max_age_secs))
        .build()
}

fn build_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path(config.cookie_path.clone())
        .max_age(CookieDuration::ZERO)
        .build()
}
