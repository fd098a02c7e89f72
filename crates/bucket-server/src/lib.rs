pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use bucket_core::config::ProxyConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(config: &ProxyConfig) -> Router {
    let app_state = state::AppState::new(config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Upstream proxy
        .route("/api/buckets", get(routes::buckets::get_buckets))
        // Timeline projection
        .route(
            "/api/timeline",
            get(routes::timeline::get_timeline).post(routes::timeline::project_timeline),
        )
        // Cluster click summaries
        .route("/api/cluster", post(routes::cluster::summarize_cluster))
        .fallback(embed::static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the server on a pre-bound listener.
///
/// The caller binds first so it can report the actual port before serving
/// (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    config: ProxyConfig,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(&config);

    tracing::info!("Backend server listening at http://localhost:{actual_port}");
    tracing::info!("Proxying bucket data from {}", config.upstream_url);

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
