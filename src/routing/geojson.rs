//! GeoJSON LineString rendering of a [`JourneyResult`], grounded in the
//! teacher crate's `routing/itinerary/to_geojson.rs`.

use geo::{Coord, LineString};
use geojson::{Feature, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::error::QueryError;
use crate::model::Timetable;

use super::journey::JourneyResult;

/// Render `result`'s `routing_path` as a single-feature GeoJSON
/// `Feature` whose geometry is a `LineString` through each stop's
/// `(lon, lat)`, in path order.
pub fn journey_to_geojson(timetable: &Timetable, result: &JourneyResult) -> Result<Feature, QueryError> {
    let coords: Vec<Coord<f64>> = result
        .routing_path
        .iter()
        .filter_map(|stop_id| timetable.resolve_stop(stop_id))
        .map(|stop| {
            let (lat, lon) = timetable.coordinates(stop);
            Coord { x: lon, y: lat }
        })
        .collect();

    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "destination_stop_id": result.destination_stop_id,
            "time_to_reach": result.time_to_reach,
        }
    });

    Feature::from_json_value(value).map_err(|e| QueryError::GeoJson(e.to_string()))
}
