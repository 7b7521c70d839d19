use serde_json::Value;
use tracing::Instrument;

use smartcotton_common::api::optimize::OptimizeResponse;
use smartcotton_common::api::solver::SolverSolution;
use smartcotton_common::types::Plan;
use smartcotton_common::{LogisticsError, RequestId};

use crate::builder::build_solver_request;
use crate::feasibility::check_feasibility;
use crate::geometry::route_path;
use crate::solver::SolverClient;

/// Validate, check, shape and dispatch one optimization request.
///
/// `body` is the raw request JSON; it is echoed back unchanged on success.
/// The solver is called at most once. `solver` is `None` when no credential
/// is configured.
pub async fn optimize(
    solver: Option<&SolverClient>,
    profile: &str,
    body: Value,
) -> Result<OptimizeResponse, LogisticsError> {
    let request_id = RequestId::new();
    let span = tracing::info_span!("optimize", request_id = %request_id);

    async move {
        let plan = Plan::from_json(&body)?;

        let depot = plan
            .depot
            .position()
            .ok_or_else(|| LogisticsError::Validation("Depot lat/lon must be numbers.".into()))?;

        let feasibility = check_feasibility(&plan.fields, &plan.vehicles);
        if !feasibility.ok {
            tracing::info!(
                errors = feasibility.errors.len(),
                "Plan rejected by feasibility check"
            );
            return Err(LogisticsError::Infeasible(feasibility));
        }

        let ors_request = build_solver_request(&plan, depot, profile)?;

        let solver = solver.ok_or(LogisticsError::SolverNotConfigured)?;

        tracing::info!(
            jobs = ors_request.jobs.len(),
            vehicles = ors_request.vehicles.len(),
            "Dispatching optimization request"
        );

        let ors_solution = solver.optimize(&ors_request).await?;
        log_solution(&ors_solution);

        Ok::<_, LogisticsError>(OptimizeResponse {
            request: body,
            ors_request,
            ors_solution,
        })
    }
    .instrument(span)
    .await
}

fn log_solution(raw: &Value) {
    let solution = match SolverSolution::from_value(raw) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Solver solution has an unexpected shape");
            return;
        }
    };

    let path_points: usize = solution.routes.iter().map(|r| route_path(r).len()).sum();

    metrics::counter!("optimize.unassigned_jobs").increment(solution.unassigned.len() as u64);

    if !solution.unassigned.is_empty() {
        tracing::warn!(
            unassigned = solution.unassigned.len(),
            "Solver left fields unassigned"
        );
    }

    tracing::info!(
        routes = solution.routes.len(),
        unassigned = solution.unassigned.len(),
        distance_m = solution.total_distance(),
        duration_s = solution.total_duration(),
        path_points,
        "Optimization completed"
    );
}
