use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{EntityId, Position};

/// A coordinate in solver order: `[lon, lat]`.
///
/// Plans carry `{lat, lon}`; the solver wants a two-element array with the
/// longitude first. Convert through [`Position`] in both directions rather
/// than building the array by hand.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    pub fn lon(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

impl From<Position> for LonLat {
    fn from(p: Position) -> Self {
        Self(p.lon, p.lat)
    }
}

impl From<LonLat> for Position {
    fn from(c: LonLat) -> Self {
        Position::new(c.1, c.0)
    }
}

/// POST /optimization request body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverRequest {
    pub jobs: Vec<SolverJob>,
    pub vehicles: Vec<SolverVehicle>,
    pub options: SolverOptions,
}

/// One field to visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverJob {
    pub id: EntityId,
    pub location: LonLat,
    /// Single capacity dimension: tons.
    pub amount: Vec<i64>,
    /// Seconds spent on site.
    pub service: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverVehicle {
    pub id: EntityId,
    pub profile: String,
    pub start: LonLat,
    pub end: LonLat,
    pub capacity: Vec<i64>,
    /// `[0, shift seconds]`; absent means available for the whole horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window: Option<[i64; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Ask for route geometry in the solution.
    pub g: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { g: true }
    }
}

// ---------------------------------------------------------------------------
// Solution view
// ---------------------------------------------------------------------------

/// Lenient typed view over a solver solution.
///
/// The solution itself is relayed to the dashboard untouched; this view only
/// reads the parts the service logs and reports on. Every attribute is
/// optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverSolution {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub summary: Option<SolutionSummary>,
    #[serde(default)]
    pub routes: Vec<SolverRoute>,
    #[serde(default)]
    pub unassigned: Vec<UnassignedJob>,
}

impl SolverSolution {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Metres over all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().filter_map(|r| r.distance).sum()
    }

    /// Seconds over all routes.
    pub fn total_duration(&self) -> f64 {
        self.routes.iter().filter_map(|r| r.duration).sum()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolutionSummary {
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub routes: Option<u64>,
    #[serde(default)]
    pub unassigned: Option<u64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverRoute {
    #[serde(default)]
    pub vehicle: Option<EntityId>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub geometry: Option<RouteGeometry>,
    #[serde(default)]
    pub steps: Vec<RouteStep>,
}

/// Route shape as returned by the solver: an encoded polyline (the default
/// when geometry is requested) or a GeoJSON-style coordinate list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteGeometry {
    Encoded(String),
    Coordinates { coordinates: Vec<Vec<f64>> },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteStep {
    /// "start", "job" or "end".
    #[serde(default, rename = "type")]
    pub step_type: Option<String>,
    #[serde(default)]
    pub job: Option<EntityId>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UnassignedJob {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub location: Option<Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lon_lat_order() {
        let plan_point = Position::new(43.2973, 68.2517);
        let solver_point = LonLat::from(plan_point);

        assert_eq!(serde_json::to_value(solver_point).unwrap(), json!([68.2517, 43.2973]));

        let decoded: LonLat = serde_json::from_value(json!([68.2517, 43.2973])).unwrap();
        assert_eq!(Position::from(decoded), plan_point);
        assert_eq!(decoded.lat(), 43.2973);
        assert_eq!(decoded.lon(), 68.2517);
    }

    #[test]
    fn test_vehicle_without_time_window_omits_key() {
        let vehicle = SolverVehicle {
            id: EntityId::Number(1),
            profile: "driving-car".into(),
            start: LonLat(68.25, 43.3),
            end: LonLat(68.25, 43.3),
            capacity: vec![20],
            time_window: None,
        };

        let value = serde_json::to_value(&vehicle).unwrap();
        assert!(value.get("time_window").is_none());
        assert_eq!(value["start"], json!([68.25, 43.3]));
    }

    #[test]
    fn test_parse_solution_view() {
        let raw = json!({
            "code": 0,
            "summary": {"cost": 1520, "routes": 1, "unassigned": 1, "distance": 18234.5, "duration": 1520},
            "unassigned": [{"id": 3, "location": [68.3, 43.4]}],
            "routes": [{
                "vehicle": 1,
                "distance": 18234.5,
                "duration": 1520,
                "geometry": "_p~iF~ps|U_ulLnnqC",
                "steps": [
                    {"type": "start", "location": [68.25, 43.3]},
                    {"type": "job", "job": 1, "location": [68.27, 43.31]},
                    {"type": "end", "location": [68.25, 43.3]}
                ]
            }]
        });

        let solution = SolverSolution::from_value(&raw).unwrap();
        assert_eq!(solution.routes.len(), 1);
        assert_eq!(solution.unassigned.len(), 1);
        assert_eq!(solution.routes[0].steps[1].job, Some(EntityId::Number(1)));
        assert_eq!(solution.routes[0].steps[1].step_type.as_deref(), Some("job"));
        assert!(matches!(
            solution.routes[0].geometry,
            Some(RouteGeometry::Encoded(_))
        ));
        assert_eq!(solution.total_distance(), 18234.5);
        assert_eq!(solution.total_duration(), 1520.0);
    }

    #[test]
    fn test_parse_empty_solution() {
        let solution = SolverSolution::from_value(&json!({})).unwrap();
        assert!(solution.routes.is_empty());
        assert_eq!(solution.total_distance(), 0.0);
    }
}
