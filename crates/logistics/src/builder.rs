use smartcotton_common::api::solver::{
    LonLat, SolverJob, SolverOptions, SolverRequest, SolverVehicle,
};
use smartcotton_common::types::{round_half_up, EntityId, Field, Plan, Position, Vehicle};
use smartcotton_common::LogisticsError;

/// Service time assumed for a field that does not state one.
pub const DEFAULT_SERVICE_MINUTES: f64 = 15.0;
/// Capacity assumed for a vehicle that does not state one.
pub const DEFAULT_CAPACITY: f64 = 20.0;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Invalid coordinates for field {0}")]
    InvalidFieldCoordinates(EntityId),
}

impl From<BuildError> for LogisticsError {
    fn from(e: BuildError) -> Self {
        LogisticsError::Internal(e.to_string())
    }
}

/// Shape a feasible plan into the solver's job/vehicle schema.
///
/// Stops at the first field with unusable coordinates; a partial payload is
/// never produced. Missing demand, service time and capacity fall back to
/// 1 ton, 15 minutes and 20 tons respectively.
pub fn build_solver_request(
    plan: &Plan,
    depot: Position,
    profile: &str,
) -> Result<SolverRequest, BuildError> {
    let jobs = plan
        .fields
        .iter()
        .map(build_job)
        .collect::<Result<Vec<_>, _>>()?;

    let vehicles = plan
        .vehicles
        .iter()
        .enumerate()
        .map(|(idx, v)| build_vehicle(idx, v, depot, profile))
        .collect();

    Ok(SolverRequest {
        jobs,
        vehicles,
        options: SolverOptions::default(),
    })
}

fn build_job(field: &Field) -> Result<SolverJob, BuildError> {
    let position = field
        .position()
        .ok_or_else(|| BuildError::InvalidFieldCoordinates(field.id.clone()))?;

    let amount = field
        .demand
        .value()
        .map(|d| round_half_up(d).max(1))
        .unwrap_or(1);

    let service_minutes = field
        .service_time_minutes
        .value()
        .unwrap_or(DEFAULT_SERVICE_MINUTES);

    Ok(SolverJob {
        id: field.id.clone(),
        location: LonLat::from(position),
        amount: vec![amount],
        service: round_half_up(service_minutes * 60.0),
    })
}

fn build_vehicle(idx: usize, vehicle: &Vehicle, depot: Position, profile: &str) -> SolverVehicle {
    let capacity = round_half_up(vehicle.capacity.value().unwrap_or(DEFAULT_CAPACITY)).max(1);

    let id = match &vehicle.id {
        Some(id) if !id.is_falsy() => id.clone(),
        _ => EntityId::Number(idx as i64 + 1),
    };

    // Vehicle is available from t=0 until the end of its shift.
    let time_window = vehicle
        .shift_minutes
        .value()
        .filter(|m| *m > 0.0)
        .map(|m| [0, round_half_up(m * 60.0)]);

    SolverVehicle {
        id,
        profile: profile.to_string(),
        start: LonLat::from(depot),
        end: LonLat::from(depot),
        capacity: vec![capacity],
        time_window,
    }
}
