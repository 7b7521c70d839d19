use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::FeasibilityResult;

/// Machine-readable error class the dashboard branches its messaging on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    /// Plan rejected before any solver call; fix the plan and retry.
    Feasibility,
    /// Malformed request; a caller bug.
    Validation,
    /// The routing solver failed or could not be reached.
    Ors,
    Internal,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feasibility => "FEASIBILITY",
            Self::Validation => "VALIDATION",
            Self::Ors => "ORS",
            Self::Internal => "INTERNAL",
        }
    }
}

/// Top-level error type for logistics requests.
#[derive(Debug, Error)]
pub enum LogisticsError {
    // --- Caller errors ---
    #[error("{0}")]
    Validation(String),

    #[error("Feasibility check failed")]
    Infeasible(FeasibilityResult),

    // --- Upstream errors ---
    #[error("ORS_API_KEY is not configured on the server.")]
    SolverNotConfigured,

    #[error("ORS optimization call failed")]
    Solver { status: u16, body: Value },

    #[error("Gemini not configured on server (missing GEMINI_API_KEY).")]
    InsightsNotConfigured,

    #[error("Failed to generate AI summary")]
    Insights(String),

    // --- Operational errors ---
    /// The message is reported in `details`; the display text stays generic.
    #[error("Internal server error")]
    Internal(String),
}

impl LogisticsError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            Self::Validation(_) => ErrorType::Validation,
            Self::Infeasible(_) => ErrorType::Feasibility,
            Self::SolverNotConfigured | Self::Solver { .. } => ErrorType::Ors,
            Self::InsightsNotConfigured | Self::Insights(_) | Self::Internal(_) => {
                ErrorType::Internal
            }
        }
    }

    /// HTTP status for the response. Solver failures keep the upstream status.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Infeasible(_) => 400,
            Self::SolverNotConfigured | Self::InsightsNotConfigured => 503,
            Self::Solver { status, .. } => *status,
            Self::Insights(_) | Self::Internal(_) => 500,
        }
    }

    /// JSON body for the response.
    ///
    /// Validation, credential and summary errors carry only `error`; the
    /// optimize pipeline's feasibility, solver and internal failures are
    /// tagged with `errorType`.
    pub fn to_body(&self) -> ErrorBody {
        let mut body = ErrorBody::new(self.to_string());

        match self {
            Self::Infeasible(result) => {
                body.error_type = Some(ErrorType::Feasibility);
                body.details = serde_json::to_value(result).ok();
            }
            Self::Solver { body: upstream, .. } => {
                body.error_type = Some(ErrorType::Ors);
                body.ors_error = Some(upstream.clone());
            }
            Self::Internal(detail) => {
                body.error_type = Some(ErrorType::Internal);
                body.details = Some(Value::String(detail.clone()));
            }
            _ => {}
        }

        body
    }
}

/// Error response body shared by every logistics endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ors_error: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_type: None,
            details: None,
            ors_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feasibility_body_carries_result() {
        let mut result = FeasibilityResult::feasible();
        result.push_error("No fields were provided.");

        let err = LogisticsError::Infeasible(result);
        assert_eq!(err.status_code(), 400);

        let body = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(body["error"], "Feasibility check failed");
        assert_eq!(body["errorType"], "FEASIBILITY");
        assert_eq!(body["details"]["ok"], false);
        assert_eq!(body["details"]["errors"][0], "No fields were provided.");
        assert_eq!(body["details"]["warnings"], json!([]));
    }

    #[test]
    fn test_validation_body_is_untagged() {
        let err = LogisticsError::Validation("Depot lat/lon must be numbers.".into());
        let body = serde_json::to_value(err.to_body()).unwrap();

        assert_eq!(body, json!({"error": "Depot lat/lon must be numbers."}));
        assert_eq!(err.error_type(), ErrorType::Validation);
    }

    #[test]
    fn test_solver_error_keeps_upstream_status() {
        let err = LogisticsError::Solver {
            status: 403,
            body: json!({"error": "Access to this API has been disallowed"}),
        };
        assert_eq!(err.status_code(), 403);

        let body = serde_json::to_value(err.to_body()).unwrap();
        assert_eq!(body["errorType"], "ORS");
        assert_eq!(
            body["orsError"]["error"],
            "Access to this API has been disallowed"
        );
    }

    #[test]
    fn test_internal_error_hides_message_in_details() {
        let err = LogisticsError::Internal("Invalid coordinates for field 7".into());
        assert_eq!(err.to_string(), "Internal server error");

        let body = err.to_body();
        assert_eq!(body.error_type, Some(ErrorType::Internal));
        assert_eq!(
            body.details,
            Some(Value::String("Invalid coordinates for field 7".into()))
        );
    }

    #[test]
    fn test_not_configured_is_503() {
        assert_eq!(LogisticsError::SolverNotConfigured.status_code(), 503);
        assert_eq!(LogisticsError::InsightsNotConfigured.status_code(), 503);
        assert_eq!(LogisticsError::SolverNotConfigured.to_body().error_type, None);
    }
}
