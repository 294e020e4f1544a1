//! Point-to-point result assembly (spec §4.4).

use crate::model::{PathSegment, StopId, Time, Timetable};

use super::label::LabelTable;

/// The best journey found from the query's origins to its destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyResult {
    pub destination_stop_id: String,
    pub time_to_reach: Time,
    pub routing_path: Vec<String>,
    pub routing_path_detailed: Vec<PathSegment>,
}

/// Pick the reachable destination with the smallest `time_to_reach`
/// (spec §4.4). `None` means no journey exists to any destination.
pub fn assemble_journey(
    timetable: &Timetable,
    labels: &LabelTable,
    destinations: &[StopId],
) -> Option<JourneyResult> {
    let best = destinations
        .iter()
        .copied()
        .filter(|&stop| labels.is_reachable(stop))
        .min_by_key(|&stop| labels.time_to_reach(stop))?;

    Some(JourneyResult {
        destination_stop_id: timetable.stop(best).stop_id.clone(),
        time_to_reach: labels.time_to_reach(best),
        routing_path: labels
            .routing_path(best)
            .iter()
            .map(|&s| timetable.stop(s).stop_id.clone())
            .collect(),
        routing_path_detailed: labels.routing_path_detailed(best).to_vec(),
    })
}
