pub mod chat;
pub mod config;
pub mod matching;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;

pub struct AppState {
    pub config: config::AppConfig,
    pub store: store::pg::PgStore,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
