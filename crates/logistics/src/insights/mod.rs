mod gemini;

use std::time::Duration;

use serde_json::Value;

use smartcotton_common::config::InsightsConfig;
use smartcotton_common::LogisticsError;

/// Client for the generative-text API that writes route summaries.
pub struct InsightsClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum InsightsError {
    #[error("Insights API HTTP error: {0}")]
    Http(String),

    #[error("Insights API auth error: {0}")]
    Auth(String),

    #[error("Insights API error: {0}")]
    Api(String),

    #[error("Insights API returned no text")]
    Empty,
}

impl From<InsightsError> for LogisticsError {
    fn from(e: InsightsError) -> Self {
        LogisticsError::Insights(e.to_string())
    }
}

impl InsightsClient {
    /// Create an insights client.
    /// Reads the API key from `GEMINI_API_KEY`.
    /// Returns None if the key is not set; summary requests then answer 503.
    pub fn from_env(http: reqwest::Client, config: &InsightsConfig) -> Option<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(Self::new(http, config, key)),
            _ => {
                tracing::warn!("GEMINI_API_KEY not set, AI route summaries disabled");
                None
            }
        }
    }

    pub fn new(http: reqwest::Client, config: &InsightsConfig, api_key: String) -> Self {
        Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Three bullet-point insights for a farm manager about one solution.
    pub async fn summarize(&self, facts: &Value) -> Result<String, InsightsError> {
        let prompt = build_prompt(facts);
        gemini::call_generate_content(&self.http, &self.endpoint, &self.api_key, self.timeout, &prompt)
            .await
    }
}

/// The summary prompt with the facts pretty-printed at the end.
pub fn build_prompt(facts: &Value) -> String {
    let facts = serde_json::to_string_pretty(facts).unwrap_or_else(|_| facts.to_string());

    format!(
        r#"You are a logistics and farm operations expert.

You are helping optimize cotton harvest routes near Turkistan. You will receive a JSON object called "facts" which contains:

- totals: distance/time, capacity, savings vs a naive baseline
- vehicles: per-vehicle distance, hours, load
- unassignedCount: how many fields could not be served

TASK:
Write **exactly 3 bullet points** of practical insights for a farm manager.
Rules:
- Max 80 words total.
- Focus on: (1) utilization, (2) unassigned fields (if any), (3) distance/time savings and 1 simple recommendation.
- Do NOT output JSON, only plain text bullets starting with "- ".

facts:
{}"#,
        facts
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_embeds_facts() {
        let facts = json!({
            "totals": {"distance": "42.1", "time": "95", "capacity": 40},
            "vehicles": [{"name": "Harvester 1", "distance": "20.3", "hours": "0.8", "load": 20}],
            "unassignedCount": 0
        });

        let prompt = build_prompt(&facts);
        assert!(prompt.starts_with("You are a logistics and farm operations expert."));
        assert!(prompt.contains("exactly 3 bullet points"));
        assert!(prompt.contains("\"unassignedCount\": 0"));
        assert!(prompt.contains("Harvester 1"));
        assert!(prompt.trim_end().ends_with('}'));
    }

    #[test]
    fn test_endpoint_includes_model() {
        let config = InsightsConfig {
            base_url: "https://generativelanguage.googleapis.com/".into(),
            model: "gemini-2.0-flash-exp".into(),
            timeout_seconds: 20,
        };

        let client = InsightsClient::new(reqwest::Client::new(), &config, "key".into());
        assert_eq!(
            client.endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[test]
    fn test_errors_surface_generic_message() {
        let err: LogisticsError = InsightsError::Empty.into();
        assert_eq!(err.to_string(), "Failed to generate AI summary");
        assert_eq!(err.status_code(), 500);
    }
}
