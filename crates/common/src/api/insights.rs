use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /api/logistics/ai-summary request.
///
/// `facts` is whatever summary the dashboard computed from a solution:
/// totals, per-vehicle distance/hours/load and the unassigned count. It is
/// passed to the model as pretty-printed JSON.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<Value>,
}

/// POST /api/logistics/ai-summary response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Three "- " prefixed bullet lines.
    pub text: String,
}
