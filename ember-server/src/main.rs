use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ember_server::config::AppConfig;
use ember_server::routes::{health, matches, messages, swipes, users};
use ember_server::store::pg::PgStore;
use ember_server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ember_shared::middleware::init_tracing("ember-server");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = ember_shared::clients::db::create_pool(&config.database_url);

    // Initialize Prometheus metrics
    let metrics_handle = ember_shared::middleware::init_metrics();

    let state = Arc::new(AppState {
        config,
        store: PgStore::new(db),
        metrics_handle,
    });

    let app = Router::new()
        // Health & metrics
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        // Matching core
        .route("/swipe", post(swipes::swipe))
        .route("/matches", get(matches::list_matches))
        // Match-scoped chat
        .route("/messages", get(messages::list_messages).post(messages::send_message))
        // User collaborator boundary
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .layer(axum::middleware::from_fn(
            ember_shared::middleware::metrics_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "ember-server starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
