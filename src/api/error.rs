use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::Error;

/// Converts crate errors into status-only HTTP responses.
///
/// Bodies stay empty: no failure detail reaches clients. Server-side
/// failures are logged with their detail instead.
#[derive(Debug)]
pub struct AppError(pub Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Storage(_) | Error::Config(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            log::error!(target: "alcove::api", "msg=\"request failed\" error=\"{}\"", self.0);
        }

        status.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: Error) -> StatusCode {
        AppError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(Error::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(Error::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(Error::Validation("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::Storage("io".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
