use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::numeric::Numeric;
use crate::error::LogisticsError;

/// Identifier of a field or vehicle as chosen by the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// `0` and `""` do not count as an id.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A validated geographic position in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Harvest site to be visited once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: EntityId,
    #[serde(default)]
    pub lat: Numeric,
    #[serde(default)]
    pub lon: Numeric,
    /// Quantity to collect, in tons.
    #[serde(default, skip_serializing_if = "Numeric::is_absent")]
    pub demand: Numeric,
    #[serde(default, skip_serializing_if = "Numeric::is_absent")]
    pub service_time_minutes: Numeric,
}

impl Field {
    /// Both coordinates, or `None` if either is non-numeric.
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.lat.value()?, self.lon.value()?))
    }
}

/// A harvester or truck available for the day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Integer or string ids only; anything else is treated as unset.
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<EntityId>,
    /// Display label; non-string values read as empty.
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    /// Same unit as field demand.
    #[serde(default, skip_serializing_if = "Numeric::is_absent")]
    pub capacity: Numeric,
    /// Working time available; zero means no time window.
    #[serde(default, skip_serializing_if = "Numeric::is_absent")]
    pub shift_minutes: Numeric,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().map(EntityId::Number),
        Value::String(s) => Some(EntityId::Text(s)),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Start and end point of every vehicle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    #[serde(default)]
    pub lat: Numeric,
    #[serde(default)]
    pub lon: Numeric,
}

impl Depot {
    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.lat.value()?, self.lon.value()?))
    }
}

/// A fleet-planning request: one depot, the fields to harvest, the vehicles
/// to do it with. Lives for a single optimization request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub depot: Depot,
    pub fields: Vec<Field>,
    pub vehicles: Vec<Vehicle>,
}

impl Plan {
    /// Check the top-level request shape and read the plan out of it.
    ///
    /// Rejects a missing depot, a `fields` value that is not an array, and a
    /// missing or empty `vehicles` array. Coordinates are not checked here.
    pub fn from_json(body: &Value) -> Result<Self, LogisticsError> {
        let depot = body.get("depot").filter(|d| !d.is_null());
        let fields = body.get("fields").and_then(Value::as_array);

        let (Some(depot), Some(fields)) = (depot, fields) else {
            return Err(LogisticsError::Validation(
                "You must send a depot and a fields array.".into(),
            ));
        };

        let vehicles = match body.get("vehicles").and_then(Value::as_array) {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(LogisticsError::Validation(
                    "You must send at least one vehicle.".into(),
                ))
            }
        };

        // A depot that is not an object has no usable coordinates; that is
        // reported later as non-numeric lat/lon.
        let depot: Depot = serde_json::from_value(depot.clone()).unwrap_or_default();

        let fields = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| {
                serde_json::from_value::<Field>(f.clone()).map_err(|e| {
                    LogisticsError::Validation(format!("Invalid field at index {}: {}", idx, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let vehicles = vehicles
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                serde_json::from_value::<Vehicle>(v.clone()).map_err(|e| {
                    LogisticsError::Validation(format!("Invalid vehicle at index {}: {}", idx, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            depot,
            fields,
            vehicles,
        })
    }
}
