use axum::Router;
use axum::routing::{delete, get, post};

use super::{cors, handlers};
use crate::auth::AuthGate;
use crate::store::{LedgerRepository, TaskRepository};

/// Shared state: the gate plus one repository per surface.
#[derive(Clone)]
pub struct AppState<L, T> {
    pub gate: AuthGate,
    pub ledger: L,
    pub tasks: T,
}

/// Wishlist surface: public read, secret-code gated write.
pub fn wishlist_routes<L, T>() -> Router<AppState<L, T>>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/purchases",
        get(handlers::list_purchases::<L, T>).post(handlers::record_purchase::<L, T>),
    )
}

/// Tasks surface: session gated, plus the login/logout pair that manages
/// the session cookie itself.
pub fn task_routes<L, T>() -> Router<AppState<L, T>>
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_tasks::<L, T>).post(handlers::create_task::<L, T>),
        )
        .route("/{id}", delete(handlers::delete_task::<L, T>))
        .route("/login", post(handlers::login::<L, T>))
        .route("/logout", get(handlers::logout::<L, T>))
}

/// Assembles the full application router with per-surface CORS policy.
pub fn app<L, T>(
    state: AppState<L, T>,
    wishlist_origin: Option<&str>,
    tasks_origin: Option<&str>,
) -> Router
where
    L: LedgerRepository + Clone + Send + Sync + 'static,
    T: TaskRepository + Clone + Send + Sync + 'static,
{
    let wishlist = wishlist_routes::<L, T>().layer(cors::surface(wishlist_origin));
    let tasks = task_routes::<L, T>().layer(cors::surface(tasks_origin));
    let root = Router::new()
        .route("/", get(handlers::root))
        .layer(cors::permissive());

    Router::new()
        .nest("/wishlist", wishlist)
        .nest("/tasks", tasks)
        .merge(root)
        .with_state(state)
}
