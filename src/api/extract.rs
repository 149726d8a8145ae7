use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use cookie::Cookie;

use super::error::AppError;
use super::routes::AppState;
use crate::store::{LedgerRepository, TaskRepository};

/// Proof that the request carried a valid session cookie.
///
/// Extraction runs the session-mode gate before the handler body; a
/// missing or invalid cookie rejects with 401 and never reaches the store.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSession;

/// Finds a cookie by name in the `Cookie` request header.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    Cookie::split_parse(raw)
        .flatten()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_owned())
}

impl<L, T> FromRequestParts<AppState<L, T>> for AuthenticatedSession
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<L, T>,
    ) -> Result<Self, Self::Rejection> {
        let name = &state.gate.sessions().config().cookie_name;
        let presented = cookie_value(&parts.headers, name);

        state
            .gate
            .authorize_session(presented.as_deref())
            .map_err(AppError)?;

        Ok(AuthenticatedSession)
    }
}
