use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::solver::SolverRequest;

/// POST /api/logistics/optimize success response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// The request body exactly as received.
    pub request: Value,
    /// Payload sent to the solver.
    pub ors_request: SolverRequest,
    /// Solver reply, unmodified.
    pub ors_solution: Value,
}
