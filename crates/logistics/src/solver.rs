use std::time::Duration;

use serde_json::Value;

use smartcotton_common::api::solver::SolverRequest;
use smartcotton_common::config::SolverConfig;
use smartcotton_common::LogisticsError;

/// Client for the external routing-optimization API.
///
/// One call per request, bounded by the configured timeout. No retries:
/// retry policy belongs to the caller.
pub struct SolverClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Solver returned {status}")]
    Rejected { status: u16, body: Value },

    #[error("Solver request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Solver HTTP error: {0}")]
    Http(String),

    #[error("Solver response parse error: {0}")]
    Parse(String),
}

impl From<SolverError> for LogisticsError {
    fn from(e: SolverError) -> Self {
        let message = e.to_string();
        match e {
            SolverError::Rejected { status, body } => LogisticsError::Solver { status, body },
            SolverError::Timeout(_) => LogisticsError::Solver {
                status: 504,
                body: Value::String(message),
            },
            SolverError::Http(_) | SolverError::Parse(_) => LogisticsError::Solver {
                status: 502,
                body: Value::String(message),
            },
        }
    }
}

impl SolverClient {
    /// Create a solver client.
    /// Reads the API key from `ORS_API_KEY`.
    /// Returns None if the key is not set; optimize requests then answer 503.
    pub fn from_env(http: reqwest::Client, config: &SolverConfig) -> Option<Self> {
        match std::env::var("ORS_API_KEY") {
            Ok(key) if !key.is_empty() => Some(Self::new(http, config, key)),
            _ => {
                tracing::warn!("ORS_API_KEY not set, route optimization disabled");
                None
            }
        }
    }

    pub fn new(http: reqwest::Client, config: &SolverConfig, api_key: String) -> Self {
        Self {
            http,
            endpoint: format!("{}/optimization", config.base_url.trim_end_matches('/')),
            api_key,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// POST the payload and return the solution body as-is.
    pub async fn optimize(&self, payload: &SolverRequest) -> Result<Value, SolverError> {
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("solver.request.latency").record(latency);

        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            metrics::counter!("solver.request.errors", "status" => status.as_u16().to_string())
                .increment(1);
            // Relay the upstream body; fall back to the raw text when it is not JSON.
            let body = if body.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&body).unwrap_or(Value::String(body))
            };
            return Err(SolverError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(latency_secs = latency, "Solver call completed");

        serde_json::from_str(&body).map_err(|e| SolverError::Parse(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> SolverError {
        metrics::counter!("solver.request.errors", "status" => "transport").increment(1);
        if e.is_timeout() {
            SolverError::Timeout(self.timeout)
        } else {
            SolverError::Http(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejected_keeps_status_and_body() {
        let err: LogisticsError = SolverError::Rejected {
            status: 429,
            body: json!({"error": "Rate limit exceeded"}),
        }
        .into();

        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_body().ors_error, Some(json!({"error": "Rate limit exceeded"})));
    }

    #[test]
    fn test_transport_failures_map_to_gateway_statuses() {
        let timeout: LogisticsError = SolverError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(timeout.status_code(), 504);

        let http: LogisticsError = SolverError::Http("connection refused".into()).into();
        assert_eq!(http.status_code(), 502);
        assert_eq!(http.error_type(), smartcotton_common::ErrorType::Ors);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = SolverConfig {
            base_url: "https://api.openrouteservice.org/".into(),
            profile: "driving-car".into(),
            timeout_seconds: 30,
        };

        let client = SolverClient::new(reqwest::Client::new(), &config, "key".into());
        assert_eq!(client.endpoint, "https://api.openrouteservice.org/optimization");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }
}
