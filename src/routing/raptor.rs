//! The round-based search itself (spec §4.3): alternating trip-scan and
//! transfer-relax phases over a [`LabelTable`], grounded in the teacher
//! crate's `traced_raptor` round loop and in `examples/original_source/
//! sayori/raptor.py::run_raptor`.

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::debug;

use crate::error::QueryError;
use crate::model::{Direction, PathSegment, StopId, Time, Timetable, TripId};
use crate::query::Query;

use super::label::LabelTable;

/// Trips a candidate boarding must belong to (spec §4.3.2 step 1c):
/// either the calendar's active set for the query date, or — when the
/// query supplies an explicit trip allow-list — that list instead.
enum TripFilter<'a> {
    Calendar(Option<&'a FixedBitSet>),
    Explicit(FixedBitSet),
}

impl TripFilter<'_> {
    fn contains(&self, trip: TripId) -> bool {
        match self {
            TripFilter::Calendar(Some(bitset)) => bitset.contains(trip),
            TripFilter::Calendar(None) => false,
            TripFilter::Explicit(bitset) => bitset.contains(trip),
        }
    }
}

fn resolve_trip_filter<'a>(timetable: &'a Timetable, query: &Query) -> TripFilter<'a> {
    match &query.available_trip_ids {
        Some(ids) => {
            let mut bitset = FixedBitSet::with_capacity(timetable.trip_count());
            for id in ids {
                if let Some(trip) = timetable.resolve_trip(id) {
                    bitset.insert(trip);
                }
            }
            TripFilter::Explicit(bitset)
        }
        None => TripFilter::Calendar(timetable.active_trip_ids(query.specified_date)),
    }
}

/// Concatenate `existing` (the pivot's current path) with `segment`
/// (oriented pivot→…→target in forward mode, target→…→pivot in reverse
/// mode), dropping the element the two share (spec §4.3.4).
///
/// The reference implementation's transfer-relax code reuses its
/// forward-oriented segment unchanged in reverse mode, which would
/// leave the composed path violating the "path starts/ends at the
/// current stop" invariant (spec §3, §9 design note). This composition
/// rule is the corrected, direction-symmetric version.
fn compose<T: Clone>(existing: &[T], segment: &[T], direction: Direction) -> Vec<T> {
    if existing.is_empty() {
        return segment.to_vec();
    }
    match direction {
        Direction::Forward => {
            let mut out = existing.to_vec();
            out.extend_from_slice(&segment[1..]);
            out
        }
        Direction::Reverse => {
            let mut out = segment[..segment.len() - 1].to_vec();
            out.extend_from_slice(existing);
            out
        }
    }
}

/// Run the full `K+1`-round RAPTOR search and return the populated
/// label table. `origins` must already be resolved stop ids (unknown
/// stop_ids in the query are filtered out by the caller per spec §7).
pub fn run(timetable: &Timetable, query: &Query, origins: &[StopId]) -> Result<LabelTable, QueryError> {
    let direction = query.direction();
    let trip_filter = resolve_trip_filter(timetable, query);

    let mut labels = LabelTable::new(timetable.stop_count());
    labels.initialise(origins);

    for round in 0..=query.transfers_limit {
        let trip_scan_updated = trip_scan(timetable, &mut labels, direction, query.specified_secs, &trip_filter);

        let previous_just_updated = labels.just_updated().to_vec();
        let transfer_updated = transfer_relax(timetable, &mut labels, direction);
        labels.merge_already_transferred(&previous_just_updated);

        let mut next_just_updated = trip_scan_updated;
        next_just_updated.extend(transfer_updated);
        next_just_updated.sort_unstable();
        next_just_updated.dedup();
        labels.set_just_updated(next_just_updated);

        debug!(
            "round {round}: {} stops reachable so far",
            labels.reachable_stops().len()
        );

        if labels.just_updated().is_empty() {
            break;
        }
    }

    Ok(labels)
}

/// Spec §4.3.2: for every stop marked in the previous phase, find the
/// best onward trip per pivot and relax every downstream stop on it.
/// Returns the stops whose label actually improved, so the caller can
/// fold them into the next round's `just_updated` set alongside the
/// transfer-relax phase's output (spec §4.3.1; see `DESIGN.md` for why
/// carrying forward only the transfer phase's output, as the reference
/// implementation's bookkeeping literally does, would strand any stop
/// reached purely by trip-scan and never board it onward).
fn trip_scan(
    timetable: &Timetable,
    labels: &mut LabelTable,
    direction: Direction,
    specified_secs: Time,
    trip_filter: &TripFilter<'_>,
) -> Vec<StopId> {
    let just_updated = labels.just_updated().to_vec();
    let mut updated = Vec::new();

    // trip -> feeding (stop, position-in-trip) pairs, to pick the single
    // best pivot per trip before walking it onward once (spec §4.3.2
    // step 2: "a trip is scanned at most once per round").
    let mut pivot_candidates: HashMap<TripId, Vec<(StopId, usize)>> = HashMap::new();

    for &stop in &just_updated {
        let preceding = labels.preceding_trips(stop);
        let time_to_reach = labels.time_to_reach(stop);
        let pivot_time = match direction {
            Direction::Forward => specified_secs.checked_add(time_to_reach),
            Direction::Reverse => specified_secs.checked_sub(time_to_reach),
        };
        let Some(pivot_time) = pivot_time else {
            log::warn!("overflow computing boarding time at stop {stop}, skipping");
            continue;
        };

        for candidate in timetable.stop_times_at(stop, direction, pivot_time) {
            if !trip_filter.contains(candidate.trip) || preceding.contains(&candidate.trip) {
                continue;
            }
            pivot_candidates
                .entry(candidate.trip)
                .or_default()
                .push((stop, candidate.position));
        }
    }

    for (trip, feeders) in pivot_candidates {
        let &(pivot_stop, pivot_position) = match direction {
            Direction::Forward => feeders.iter().max_by_key(|&&(_, pos)| pos),
            Direction::Reverse => feeders.iter().min_by_key(|&&(_, pos)| pos),
        }
        .expect("trip always has at least one feeding stop");

        let preceding_pivot = labels.preceding_trips(pivot_stop).to_vec();
        let existing_path = labels.routing_path(pivot_stop).to_vec();
        let existing_detailed = labels.routing_path_detailed(pivot_stop).to_vec();

        let rows = timetable.stop_times_of_trip(trip);
        // Strictly past the pivot: the pivot was already reachable before
        // boarding this trip, and with nonzero dwell time (`departure ≥
        // arrival` is permitted, spec §3/§6.2) relaxing it against its own
        // row here could lower its label below its true value.
        let onward: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Forward => Box::new(pivot_position + 1..rows.len()),
            Direction::Reverse => Box::new((0..pivot_position).rev()),
        };

        for position in onward {
            let row = rows[position];
            // `arrival`/`departure` are absolute seconds-since-midnight, on
            // the same clock as `specified_secs`, so the elapsed time from
            // the query's reference instant is just the difference — no
            // pivot baseline term. Adding `time_to_reach(pivot)` here, as
            // the reference implementation literally does, double-counts
            // the first leg for any pivot beyond an origin (see `DESIGN.md`);
            // it is reachable only through the feasibility check already
            // applied when this trip was selected as a candidate.
            let candidate_time = match direction {
                Direction::Forward => row.arrival.checked_sub(specified_secs),
                Direction::Reverse => specified_secs.checked_sub(row.departure),
            };
            let Some(candidate_time) = candidate_time else {
                log::warn!("overflow computing arrival at trip {trip} position {position}, skipping");
                continue;
            };

            let (lo, hi) = match direction {
                Direction::Forward => (pivot_position, position),
                Direction::Reverse => (position, pivot_position),
            };
            let segment_rows = &rows[lo..=hi];
            let trip_id_str = timetable.trip(trip).trip_id.clone();
            let segment_stops: Vec<StopId> = segment_rows.iter().map(|r| r.stop).collect();
            let segment_detailed: Vec<PathSegment> = segment_rows
                .iter()
                .map(|r| PathSegment::Board {
                    trip_id: trip_id_str.clone(),
                    stop_sequence: r.stop_sequence,
                    stop_id: timetable.stop(r.stop).stop_id.clone(),
                })
                .collect();

            let new_path = compose(&existing_path, &segment_stops, direction);
            let new_detailed = compose(&existing_detailed, &segment_detailed, direction);

            if labels.try_update(
                row.stop,
                candidate_time,
                new_path,
                new_detailed,
                Some(trip),
                Some(preceding_pivot.clone()),
            ) {
                updated.push(row.stop);
            }
        }
    }

    updated.sort_unstable();
    updated.dedup();
    updated
}

/// Spec §4.3.3: relax every outgoing foot-transfer from every stop
/// reachable so far that hasn't had its transfers relaxed already.
/// Newly reached stops are not relaxed again within the same phase —
/// bounding the scan to the reachable-set snapshot taken before the
/// phase starts enforces that without a separate marker.
fn transfer_relax(timetable: &Timetable, labels: &mut LabelTable, direction: Direction) -> Vec<StopId> {
    let snapshot = labels.reachable_stops().to_vec();
    let mut updated = Vec::new();

    for stop in snapshot {
        if labels.is_already_transferred(stop) {
            continue;
        }
        let time_to_reach = labels.time_to_reach(stop);
        let existing_path = labels.routing_path(stop).to_vec();
        let existing_detailed = labels.routing_path_detailed(stop).to_vec();
        let preceding = labels.preceding_trips(stop).to_vec();

        for edge in timetable.outgoing_transfers(stop) {
            let Some(candidate_time) = time_to_reach.checked_add(edge.min_transfer_time) else {
                log::warn!("overflow computing transfer time from stop {stop}, skipping");
                continue;
            };

            let (segment_stops, segment_detailed) = match direction {
                Direction::Forward => (
                    vec![stop, edge.target],
                    vec![
                        PathSegment::Walk {
                            stop_sequence: 1,
                            stop_id: timetable.stop(stop).stop_id.clone(),
                        },
                        PathSegment::Walk {
                            stop_sequence: 2,
                            stop_id: timetable.stop(edge.target).stop_id.clone(),
                        },
                    ],
                ),
                Direction::Reverse => (
                    vec![edge.target, stop],
                    vec![
                        PathSegment::Walk {
                            stop_sequence: 1,
                            stop_id: timetable.stop(edge.target).stop_id.clone(),
                        },
                        PathSegment::Walk {
                            stop_sequence: 2,
                            stop_id: timetable.stop(stop).stop_id.clone(),
                        },
                    ],
                ),
            };

            let new_path = compose(&existing_path, &segment_stops, direction);
            let new_detailed = compose(&existing_detailed, &segment_detailed, direction);

            if labels.try_update(
                edge.target,
                candidate_time,
                new_path,
                new_detailed,
                None,
                Some(preceding.clone()),
            ) {
                updated.push(edge.target);
            }
        }
    }

    updated.sort_unstable();
    updated.dedup();
    updated
}
