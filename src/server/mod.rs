//! The REST API backing the portfolio page and its admin view.

pub mod error;
pub mod routes;

use crate::config::ServerConfig;
use crate::contact::Inbox;
use crate::portfolio::PortfolioStore;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, put},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use routes::{
    contact_stats_handler, create_portfolio_handler, get_portfolio_handler, health_handler, list_contacts_handler,
    submit_contact_handler, update_contact_handler, update_portfolio_handler,
};

/// Everything the handlers share
#[derive(Debug, Default)]
pub struct AppState {
    pub portfolio: PortfolioStore,
    pub inbox: Inbox,
}

impl AppState {
    pub fn new(portfolio: PortfolioStore) -> Arc<Self> {
        Arc::new(Self { portfolio, inbox: Inbox::new() })
    }
}

/// All routes, mounted under `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api", get(health_handler))
        .route("/api/", get(health_handler))
        .route(
            "/api/portfolio",
            get(get_portfolio_handler).post(create_portfolio_handler).put(update_portfolio_handler),
        )
        .route("/api/contact", get(list_contacts_handler).post(submit_contact_handler))
        .route("/api/contact/stats", get(contact_stats_handler))
        .route("/api/contact/{id}", put(update_contact_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on an already bound listener until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!("Server running on {address}");
    }
    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server shut down");
    Ok(())
}

/// Bind to the configured address and serve.
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::warn!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
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
