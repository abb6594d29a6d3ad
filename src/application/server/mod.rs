use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use log::{error, info};
use tokio::{net::TcpListener, signal};

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::is_authenticated;
pub use state::AppState;

use crate::application::Config;
use crate::domain::Diary;
use crate::infrastructure::ImageStore;
use routes::{
    create_entry_handler, glowbie_handler, month_entries_handler, months_handler,
    store_glowbie_handler,
};

const GLOWBIE_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/diary", post(create_entry_handler))
        .route("/api/diary/months", get(months_handler))
        .route("/api/diary/{year}/{month}", get(month_entries_handler))
        .route(
            "/api/glowbie",
            post(store_glowbie_handler).layer(DefaultBodyLimit::max(GLOWBIE_BODY_LIMIT)),
        )
        .route("/api/glowbie/{id}", get(glowbie_handler))
        .with_state(state)
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn serve(config: &Config, diary: Arc<Diary>) -> anyhow::Result<()> {
    let images = Arc::new(ImageStore::new(config.glowbie_retention));
    let sweeper = images.spawn_sweeper(config.glowbie_sweep_interval);

    let state = AppState::new(diary, images, config.auth_token.clone());
    let app = router(state);

    let address = SocketAddr::new(config.bind, config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    sweeper.shutdown();
    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
