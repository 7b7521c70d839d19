use serde::{Deserialize, Serialize};

/// Top-level service configuration, deserialized from logistics.toml.
///
/// Credentials are not part of the file; they come from the environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogisticsConfig {
    pub solver: SolverConfig,
    pub insights: InsightsConfig,
}

impl LogisticsConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Routing-optimization API (OpenRouteService-compatible).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Base URL; the optimization endpoint is `{base_url}/optimization`.
    pub base_url: String,
    /// Routing profile assigned to every vehicle (e.g. "driving-car").
    pub profile: String,
    /// Upper bound on one optimization call.
    pub timeout_seconds: u64,
}

/// Generative-text API used for the route summary bullets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsightsConfig {
    pub base_url: String,
    /// Model identifier (e.g. "gemini-2.0-flash-exp").
    pub model: String,
    pub timeout_seconds: u64,
}
