//! HTTP endpoint layer: routing, CORS policy, payload shape validation.
//!
//! Every handler follows the same control flow: validate shape, authorize
//! through the gate, perform the store operation, map the outcome to a
//! status code. No retries; failure responses carry no body.

mod cors;
mod error;
mod extract;
mod handlers;
mod routes;
mod types;

pub use cors::{permissive, restricted, surface};
pub use error::AppError;
pub use extract::AuthenticatedSession;
pub use routes::{AppState, app, task_routes, wishlist_routes};
pub use types::{CreateTaskRequest, LoginRequest, PurchaseRequest};
