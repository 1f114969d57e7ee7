//! Inventory HTTP Server

use axum::{Router, routing::get};
use hiera::{FileRecordStore, HieraError, Node, NodeRegistry, RoleRegistry};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServiceConfig;
use crate::handlers::{self, AppState};

/// API routes only. `run` adds the static asset fallback.
///
/// `:name` never matches an empty segment, so `/node/` and `/role/` always
/// reach the list and create handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/node/", get(handlers::list_nodes).post(handlers::create_node))
        .route("/node/:name", get(handlers::get_node).put(handlers::update_node))
        .route("/role/", get(handlers::list_roles).post(handlers::create_role))
        .route("/role/:name", get(handlers::get_role).put(handlers::update_role))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the registries. With `nodes_dir` set, nodes are reloaded from and
/// mirrored to that directory; roles are always memory-only.
pub fn build_state(config: &ServiceConfig) -> Result<AppState, HieraError> {
    let nodes = match &config.nodes_dir {
        Some(dir) => {
            info!("Loading nodes from {}", dir.display());
            let store = FileRecordStore::<Node>::new(dir)?;
            let (nodes, failures) = NodeRegistry::with_store(store)?;
            if !failures.is_empty() {
                warn!(
                    "{} node files in {} could not be loaded",
                    failures.len(),
                    dir.display()
                );
            }
            nodes
        }
        None => NodeRegistry::new(),
    };

    Ok(AppState::new(nodes, RoleRegistry::new()))
}

pub async fn run(
    listener: tokio::net::TcpListener,
    config: ServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(
        build_state(&config).map_err(|e| format!("Failed to initialize registries: {}", e))?,
    );

    let app = create_router(state).fallback_service(ServeDir::new(&config.static_dir));

    info!(
        "Inventory service listening on {}",
        listener
            .local_addr()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 0)))
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix. A handler that cannot be
/// installed is logged and never fires.
async fn wait_for_shutdown() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "interrupt",
        _ = terminate => "terminate",
    };
    info!(signal = received, "Inventory service draining connections");
}
