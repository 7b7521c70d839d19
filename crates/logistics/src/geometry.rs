//! Route shapes from solver solutions.
//!
//! The solver returns each route either as a Google encoded polyline
//! (precision 5, latitude first) or as a GeoJSON-style list of `[lon, lat]`
//! pairs. Both are turned into `{lat, lon}` positions here.

use smartcotton_common::api::solver::{LonLat, RouteGeometry, SolverRoute};
use smartcotton_common::types::Position;

/// Decodes a Google encoded polyline into positions.
///
/// Returns `None` if the string ends in the middle of a coordinate pair,
/// contains characters outside the polyline alphabet, or accumulates past
/// the `i64` range.
pub fn decode_polyline(encoded: &str) -> Option<Vec<Position>> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::new();
    let mut lat = 0i64;
    let mut lon = 0i64;
    let mut i = 0;

    while i < bytes.len() {
        let (lat_delta, consumed) = decode_value(&bytes[i..])?;
        i += consumed;
        lat = lat.checked_add(lat_delta)?;

        let (lon_delta, consumed) = decode_value(&bytes[i..])?;
        i += consumed;
        lon = lon.checked_add(lon_delta)?;

        coords.push(Position::new(lat as f64 / 1e5, lon as f64 / 1e5));
    }

    Some(coords)
}

/// Decodes one zig-zag varint, returning (value, bytes_consumed).
fn decode_value(bytes: &[u8]) -> Option<(i64, usize)> {
    let mut result = 0i64;
    let mut shift = 0;

    for (idx, &b) in bytes.iter().enumerate() {
        let chunk = (b as i64) - 63;
        if !(0..64).contains(&chunk) || shift > 60 {
            return None;
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            let value = if result & 1 != 0 {
                !(result >> 1)
            } else {
                result >> 1
            };
            return Some((value, idx + 1));
        }
    }

    None
}

/// Ordered positions along a route.
///
/// Prefers the route geometry; falls back to the step locations when the
/// geometry is missing or undecodable.
pub fn route_path(route: &SolverRoute) -> Vec<Position> {
    let from_geometry = match &route.geometry {
        Some(RouteGeometry::Encoded(encoded)) => decode_polyline(encoded).unwrap_or_default(),
        Some(RouteGeometry::Coordinates { coordinates }) => coordinates
            .iter()
            .filter_map(|c| lon_lat(c))
            .map(Position::from)
            .collect(),
        None => Vec::new(),
    };

    if !from_geometry.is_empty() {
        return from_geometry;
    }

    route
        .steps
        .iter()
        .filter_map(|s| s.location.as_deref().and_then(lon_lat))
        .map(Position::from)
        .collect()
}

/// Reads a `[lon, lat, ...]` array; extra elements (elevation) are ignored.
fn lon_lat(c: &[f64]) -> Option<LonLat> {
    match c {
        [lon, lat, ..] => Some(LonLat(*lon, *lat)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcotton_common::api::solver::RouteStep;

    fn close(a: Position, lat: f64, lon: f64) -> bool {
        (a.lat - lat).abs() < 1e-5 && (a.lon - lon).abs() < 1e-5
    }

    #[test]
    fn test_decode_reference_polyline() {
        // Reference string from the polyline algorithm documentation.
        let path = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();

        assert_eq!(path.len(), 3);
        assert!(close(path[0], 38.5, -120.2));
        assert!(close(path[1], 40.7, -120.95));
        assert!(close(path[2], 43.252, -126.453));
    }

    #[test]
    fn test_decode_empty_and_truncated() {
        assert_eq!(decode_polyline(""), Some(Vec::new()));
        // Latitude without longitude.
        assert_eq!(decode_polyline("_p~iF"), None);
        // Continuation bit set on the last byte.
        assert_eq!(decode_polyline("_p~iF~"), None);
    }

    #[test]
    fn test_decode_rejects_overflowing_deltas() {
        let garbled = "}~~~~~~~~~~~F".repeat(6);
        assert_eq!(decode_polyline(&garbled), None);

        let route = SolverRoute {
            geometry: Some(RouteGeometry::Encoded(garbled)),
            steps: vec![RouteStep {
                location: Some(vec![68.25, 43.3]),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(route_path(&route), vec![Position::new(43.3, 68.25)]);
    }

    #[test]
    fn test_geojson_coordinates_are_flipped() {
        let route = SolverRoute {
            geometry: Some(RouteGeometry::Coordinates {
                coordinates: vec![vec![68.2517, 43.2973], vec![68.27, 43.31, 210.0]],
            }),
            ..Default::default()
        };

        let path = route_path(&route);
        assert_eq!(
            path,
            vec![Position::new(43.2973, 68.2517), Position::new(43.31, 68.27)]
        );
    }

    #[test]
    fn test_falls_back_to_steps() {
        let route = SolverRoute {
            geometry: Some(RouteGeometry::Encoded("~".into())),
            steps: vec![
                RouteStep {
                    step_type: Some("start".into()),
                    location: Some(vec![68.25, 43.3]),
                    ..Default::default()
                },
                RouteStep {
                    step_type: Some("job".into()),
                    location: None,
                    ..Default::default()
                },
                RouteStep {
                    step_type: Some("end".into()),
                    location: Some(vec![68.25, 43.3]),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let path = route_path(&route);
        assert_eq!(path, vec![Position::new(43.3, 68.25); 2]);
    }
}
