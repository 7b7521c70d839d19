use serde::{Deserialize, Serialize};

use super::InsightsError;

// ---------------------------------------------------------------------------
// Request wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<GenerateContent<'a>>,
}

#[derive(Serialize)]
struct GenerateContent<'a> {
    parts: Vec<GeneratePart<'a>>,
}

#[derive(Serialize)]
struct GeneratePart<'a> {
    text: &'a str,
}

// ---------------------------------------------------------------------------
// Response wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// Call the `generateContent` endpoint with a single-turn text prompt.
pub async fn call_generate_content(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    timeout: std::time::Duration,
    prompt: &str,
) -> Result<String, InsightsError> {
    let start = std::time::Instant::now();

    let request = GenerateRequest {
        contents: vec![GenerateContent {
            parts: vec![GeneratePart { text: prompt }],
        }],
    };

    let response = http
        .post(endpoint)
        .query(&[("key", api_key)])
        .timeout(timeout)
        .json(&request)
        .send()
        .await
        .map_err(|e| InsightsError::Http(e.to_string()))?;

    let status = response.status();
    let latency = start.elapsed().as_secs_f64();
    metrics::histogram!("insights.request.latency").record(latency);

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        return Err(InsightsError::Auth(format!("{}: {}", status, body)));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let msg = serde_json::from_str::<GeminiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(InsightsError::Api(format!("{}: {}", status, msg)));
    }

    let body: GenerateResponse = response
        .json()
        .await
        .map_err(|e| InsightsError::Api(format!("Failed to parse response: {}", e)))?;

    extract_text(body)
}

fn extract_text(body: GenerateResponse) -> Result<String, InsightsError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(InsightsError::Empty);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = GenerateRequest {
            contents: vec![GenerateContent {
                parts: vec![GeneratePart { text: "hello" }],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "- Good utilisation\n"}, {"text": "- No unassigned fields"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120}
        }"#;

        let body: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            extract_text(body).unwrap(),
            "- Good utilisation\n- No unassigned fields"
        );
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let body: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(extract_text(body), Err(InsightsError::Empty)));
    }
}
