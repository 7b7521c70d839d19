use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use smartcotton_common::api::insights::{SummaryRequest, SummaryResponse};
use smartcotton_common::api::optimize::OptimizeResponse;
use smartcotton_common::LogisticsError;

use crate::optimize::optimize;
use crate::AppState;

/// Error response wrapper: status from the error, body from `to_body()`.
pub struct ApiError(pub LogisticsError);

impl From<LogisticsError> for ApiError {
    fn from(e: LogisticsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        metrics::counter!("logistics.errors", "error_type" => err.error_type().as_str())
            .increment(1);

        if status.is_server_error() {
            tracing::error!(error = ?err, status = status.as_u16(), "Request failed");
        } else {
            tracing::info!(error = %err, status = status.as_u16(), "Request rejected");
        }

        (status, Json(err.to_body())).into_response()
    }
}

/// POST /api/logistics/optimize: feasibility check, payload build, solver call.
pub async fn optimize_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    metrics::counter!("optimize.requests").increment(1);

    let Json(body) = payload.map_err(|e| LogisticsError::Validation(e.body_text()))?;

    let response = optimize(state.solver.as_ref(), &state.config.solver.profile, body).await?;

    Ok(Json(response))
}

/// POST /api/logistics/ai-summary: three bullet insights about a solution.
pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let client = state
        .insights
        .as_ref()
        .ok_or(LogisticsError::InsightsNotConfigured)?;

    let facts = match payload {
        Ok(Json(SummaryRequest { facts: Some(facts) })) => facts,
        _ => {
            return Err(
                LogisticsError::Validation("Missing 'facts' in request body.".into()).into(),
            )
        }
    };

    let text = client.summarize(&facts).await.map_err(|e| {
        tracing::error!(error = %e, "AI summary generation failed");
        LogisticsError::from(e)
    })?;

    Ok(Json(SummaryResponse { text }))
}

/// GET /health: liveness plus which upstream credentials are present.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let configured = |present: bool| if present { "configured" } else { "missing" };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "solver": configured(state.solver.is_some()),
            "insights": configured(state.insights.is_some()),
        })),
    )
}

/// GET /metrics: Prometheus exposition.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
