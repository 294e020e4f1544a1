//! The RAPTOR search (spec §4) and its result-assembly variants.

mod geojson;
mod isochrone;
mod journey;
mod label;
mod raptor;

pub use geojson::journey_to_geojson;
pub use isochrone::{IsochroneEntry, assemble_isochrone};
pub use journey::{JourneyResult, assemble_journey};
pub use label::LabelTable;

use rayon::prelude::*;

use crate::error::QueryError;
use crate::model::{StopId, Timetable};
use crate::query::Query;

/// Resolve `stop_ids` against `timetable`, silently dropping unknown
/// ids unless `query.strict` is set (spec §7).
fn resolve_stops(timetable: &Timetable, stop_ids: &[String], strict: bool) -> Result<Vec<StopId>, QueryError> {
    let mut resolved = Vec::with_capacity(stop_ids.len());
    for id in stop_ids {
        match timetable.resolve_stop(id) {
            Some(stop) => resolved.push(stop),
            None if strict => return Err(QueryError::UnknownStop(id.clone())),
            None => log::warn!("unknown stop_id {id} ignored (non-strict mode)"),
        }
    }
    Ok(resolved)
}

/// The search always seeds its Label Table from `origin_stop_ids` and
/// reports results relative to `destination_stop_ids`, in that role —
/// but per spec §4.3.6, reverse search swaps the two: it seeds from
/// the destinations and searches for the origins (grounded in
/// `examples/original_source/sayori/raptor.py::search_p2p_path`, which
/// reassigns `from_stop_ids = destination_stop_ids` when
/// `is_reverse_search` is set).
fn seed_and_target_ids(query: &Query) -> (&[String], &[String]) {
    if query.is_reverse_search {
        (&query.destination_stop_ids, &query.origin_stop_ids)
    } else {
        (&query.origin_stop_ids, &query.destination_stop_ids)
    }
}

/// Run a point-to-point search and assemble the best journey, if any
/// (spec §4.4). `Ok(None)` is "no journey found", not an error.
pub fn point_to_point(timetable: &Timetable, query: &Query) -> Result<Option<JourneyResult>, QueryError> {
    let (seed_ids, target_ids) = seed_and_target_ids(query);
    let seeds = resolve_stops(timetable, seed_ids, query.strict)?;
    let targets = resolve_stops(timetable, target_ids, query.strict)?;

    let labels = raptor::run(timetable, query, &seeds)?;
    Ok(assemble_journey(timetable, &labels, &targets))
}

/// Run a search and return the full reached-stop set (spec §4.5).
pub fn isochrone(timetable: &Timetable, query: &Query) -> Result<Vec<IsochroneEntry>, QueryError> {
    let (seed_ids, _) = seed_and_target_ids(query);
    let seeds = resolve_stops(timetable, seed_ids, query.strict)?;
    let labels = raptor::run(timetable, query, &seeds)?;
    Ok(assemble_isochrone(timetable, &labels))
}

/// Run many independent point-to-point queries in parallel (spec §5.1),
/// grounded in the teacher crate's `matrix::travel_time_matrix` /
/// `isochrone::calculate_bulk_isochrones`.
pub fn batch_point_to_point(
    timetable: &Timetable,
    queries: &[Query],
) -> Vec<Result<Option<JourneyResult>, QueryError>> {
    queries
        .par_iter()
        .map(|query| point_to_point(timetable, query))
        .collect()
}
