//! alcove server binary.

use alcove::api::{self, AppState};
use alcove::auth::AuthGate;
use alcove::config::AppConfig;
use alcove::credentials::Credentials;
use alcove::session::SessionManager;
use alcove::store::{FileLedger, FileTaskRepository};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "alcove=info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("failed to load configuration");

    std::fs::create_dir_all(&config.data_dir).expect("failed to create data directory");

    // Secret material is loaded exactly once; the process refuses to start
    // without it.
    let credentials = Credentials::load(&config.credentials_path).expect(
        "failed to load credentials (set ALCOVE_CREDENTIALS or place credentials.json in the data directory)",
    );

    let sessions = SessionManager::new(credentials.session_token.clone(), config.session_config());
    let gate = AuthGate::new(credentials, sessions);

    let ledger = FileLedger::new(config.ledger_path());
    let tasks = FileTaskRepository::new(config.tasks_dir()).expect("failed to create task directory");

    let state = AppState { gate, ledger, tasks };
    let router = api::app(
        state,
        config.wishlist_origin.as_deref(),
        config.tasks_origin.as_deref(),
    )
    .layer(TraceLayer::new_for_http());

    tracing::info!("alcove listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("failed to bind address");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
