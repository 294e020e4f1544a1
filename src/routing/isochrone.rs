//! Isochrone result assembly (spec §4.5): the entire label table, in a
//! form a caller can post-process spatially. This crate performs no
//! H3/hex-grid bucketing or polygon generation itself (unlike the
//! teacher crate's `algo::isochrone`, which is street-network-aware and
//! out of scope — see `SPEC_FULL.md` §4.5 Non-goals).

use crate::model::{StopId, Time, Timetable};

use super::label::LabelTable;

/// One reached stop in an isochrone result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsochroneEntry {
    pub stop_id: String,
    pub time_to_reach: Time,
    pub routing_path: Vec<String>,
}

/// Every stop with a finite label, in first-reached order.
pub fn assemble_isochrone(timetable: &Timetable, labels: &LabelTable) -> Vec<IsochroneEntry> {
    labels
        .reachable_stops()
        .iter()
        .map(|&stop: &StopId| IsochroneEntry {
            stop_id: timetable.stop(stop).stop_id.clone(),
            time_to_reach: labels.time_to_reach(stop),
            routing_path: labels
                .routing_path(stop)
                .iter()
                .map(|&s| timetable.stop(s).stop_id.clone())
                .collect(),
        })
        .collect()
}
