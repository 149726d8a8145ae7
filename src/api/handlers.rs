//! Endpoint handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use super::error::AppError;
use super::extract::AuthenticatedSession;
use super::routes::AppState;
use super::types::{CreateTaskRequest, LoginRequest, PurchaseRequest};
use crate::Error;
use crate::store::{LedgerRepository, Task, TaskRepository};

/// GET /
pub async fn root() -> &'static str {
    "alcove: private API"
}

/// GET /wishlist/purchases
pub async fn list_purchases<L, T>(
    State(state): State<AppState<L, T>>,
) -> Result<Json<Vec<String>>, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.ledger.list().await?))
}

/// POST /wishlist/purchases
///
/// Secret-code gated; the URL must be an absolute http/https URL.
pub async fn record_purchase<L, T>(
    State(state): State<AppState<L, T>>,
    Json(body): Json<PurchaseRequest>,
) -> Result<StatusCode, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    validate_purchase_url(&body.url)?;
    state.gate.verify_code(&body.code).await?;
    state.ledger.append(&body.url).await?;
    Ok(StatusCode::CREATED)
}

fn validate_purchase_url(raw: &str) -> Result<(), Error> {
    let parsed = url::Url::parse(raw)
        .map_err(|_| Error::Validation("purchase url must be absolute".to_owned()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Validation(format!(
            "purchase url scheme must be http or https, got {other}"
        ))),
    }
}

/// GET /tasks
pub async fn list_tasks<L, T>(
    _session: AuthenticatedSession,
    State(state): State<AppState<L, T>>,
) -> Result<Json<Vec<Task>>, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    Ok(Json(state.tasks.list().await?))
}

/// POST /tasks
pub async fn create_task<L, T>(
    _session: AuthenticatedSession,
    State(state): State<AppState<L, T>>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<StatusCode, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    let task = Task {
        id: body
            .id
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string()),
        title: body.title,
        notes: body.notes,
        completed: body.completed,
    };

    state.tasks.create(&task).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /tasks/{id}
pub async fn delete_task<L, T>(
    _session: AuthenticatedSession,
    State(state): State<AppState<L, T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    state.tasks.delete(&id).await?;
    Ok(StatusCode::OK)
}

/// POST /tasks/login
pub async fn login<L, T>(
    State(state): State<AppState<L, T>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AppError>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    state.gate.verify_code(&body.password).await?;

    let cookie = state.gate.sessions().issue();
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
    )
        .into_response())
}

/// GET /tasks/logout
///
/// Always succeeds; clears the client cookie whether or not one was sent.
pub async fn logout<L, T>(State(state): State<AppState<L, T>>) -> Response
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.gate.sessions().revoke();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
    )
        .into_response()
}
