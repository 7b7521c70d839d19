pub mod builder;
pub mod config;
pub mod feasibility;
pub mod geometry;
pub mod insights;
pub mod optimize;
pub mod routes;
pub mod solver;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

use smartcotton_common::config::LogisticsConfig;

use insights::InsightsClient;
use solver::SolverClient;

/// Shared application state.
pub struct AppState {
    pub config: LogisticsConfig,
    /// None when `ORS_API_KEY` is not set.
    pub solver: Option<SolverClient>,
    /// None when `GEMINI_API_KEY` is not set.
    pub insights: Option<InsightsClient>,
    pub metrics_handle: PrometheusHandle,
}

/// HTTP routes of the logistics service.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/metrics", get(routes::metrics_handler))
        .route("/api/logistics/optimize", post(routes::optimize_handler))
        .route("/api/logistics/ai-summary", post(routes::summary_handler))
        .with_state(state)
}
