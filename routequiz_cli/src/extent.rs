use std::fmt;

use serde_json::Value;

/// The bounding extent of a geometry, in GeoJSON coordinate order
/// (longitude before latitude).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// Computes the extent of a GeoJSON geometry by scanning it for
/// coordinate pairs.
///
/// Returns `None` for degenerate or malformed geometry; the caller is
/// expected to skip the viewport line rather than treat this as an error.
pub fn of(geometry: &Value) -> Option<Extent> {
    let mut extent = None;
    collect(geometry.get("coordinates")?, &mut extent);
    extent
}

fn collect(value: &Value, extent: &mut Option<Extent>) {
    let Some(items) = value.as_array() else {
        return;
    };
    // A position is an array starting with two numbers. Anything deeper
    // (line strings, multi line strings) is an array of those.
    if let [Value::Number(lon), Value::Number(lat), ..] = items.as_slice() {
        if let (Some(lon), Some(lat)) = (lon.as_f64(), lat.as_f64()) {
            if lon.is_finite() && lat.is_finite() {
                let e = extent.get_or_insert(Extent {
                    min_lon: lon,
                    min_lat: lat,
                    max_lon: lon,
                    max_lat: lat,
                });
                e.min_lon = e.min_lon.min(lon);
                e.min_lat = e.min_lat.min(lat);
                e.max_lon = e.max_lon.max(lon);
                e.max_lat = e.max_lat.max(lat);
            }
        }
        return;
    }
    for item in items {
        collect(item, extent);
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}) to ({:.4}, {:.4})",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
