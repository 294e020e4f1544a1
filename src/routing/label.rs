//! Per-query mutable label table (spec §4.2).

use fixedbitset::FixedBitSet;

use crate::model::{PathSegment, StopId, Time, TripId, UNREACHABLE};

/// Per-stop state recording the best time and path found so far in the
/// current query (spec §3 "Label").
#[derive(Debug, Clone)]
pub struct Label {
    pub time_to_reach: Time,
    pub routing_path: Vec<StopId>,
    pub routing_path_detailed: Vec<PathSegment>,
    pub preceding_trips: Vec<TripId>,
}

impl Default for Label {
    fn default() -> Self {
        Label {
            time_to_reach: UNREACHABLE,
            routing_path: Vec::new(),
            routing_path_detailed: Vec::new(),
            preceding_trips: Vec::new(),
        }
    }
}

/// Mutable per-query state: one [`Label`] per stop plus the two
/// round-bookkeeping sets the RAPTOR search alternates between (spec
/// §4.2, §4.3.1).
#[derive(Debug)]
pub struct LabelTable {
    labels: Vec<Label>,
    /// All stops that have ever had a finite label, in the order they
    /// first became reachable. Lets the transfer-relax phase avoid a
    /// full scan over every stop in the timetable (spec §9: eliminate
    /// linear scans).
    reachable: Vec<StopId>,
    just_updated: Vec<StopId>,
    already_transferred: FixedBitSet,
}

impl LabelTable {
    #[must_use]
    pub fn new(num_stops: usize) -> Self {
        LabelTable {
            labels: (0..num_stops).map(|_| Label::default()).collect(),
            reachable: Vec::new(),
            just_updated: Vec::new(),
            already_transferred: FixedBitSet::with_capacity(num_stops),
        }
    }

    /// Seed every origin with `time_to_reach = 0` and mark them
    /// just-updated (spec §4.2 `initialise`).
    pub fn initialise(&mut self, origins: &[StopId]) {
        let mut updated = Vec::with_capacity(origins.len());
        for &origin in origins {
            if self.labels[origin].time_to_reach != 0 {
                self.labels[origin] = Label {
                    time_to_reach: 0,
                    ..Label::default()
                };
                self.reachable.push(origin);
            }
            updated.push(origin);
        }
        updated.sort_unstable();
        updated.dedup();
        self.just_updated = updated;
    }

    /// iff `new_time < current_time_to_reach(stop_id)`, overwrite the
    /// time/path/detailed-path fields and return `true`. `preceding_override`,
    /// when present, replaces `preceding_trips` wholesale before the
    /// dedup-append of `boarded_trip_id` (spec §4.2 `try_update`).
    pub fn try_update(
        &mut self,
        stop: StopId,
        new_time: Time,
        new_path: Vec<StopId>,
        new_detailed_path: Vec<PathSegment>,
        boarded_trip_id: Option<TripId>,
        preceding_override: Option<Vec<TripId>>,
    ) -> bool {
        let label = &mut self.labels[stop];
        if new_time >= label.time_to_reach {
            return false;
        }
        if label.time_to_reach == UNREACHABLE {
            self.reachable.push(stop);
        }
        label.time_to_reach = new_time;
        label.routing_path = new_path;
        label.routing_path_detailed = new_detailed_path;
        if let Some(preceding) = preceding_override {
            label.preceding_trips = preceding;
        }
        if let Some(trip) = boarded_trip_id
            && label.preceding_trips.last() != Some(&trip)
        {
            label.preceding_trips.push(trip);
        }
        true
    }

    pub fn time_to_reach(&self, stop: StopId) -> Time {
        self.labels[stop].time_to_reach
    }

    pub fn is_reachable(&self, stop: StopId) -> bool {
        self.labels[stop].time_to_reach != UNREACHABLE
    }

    pub fn routing_path(&self, stop: StopId) -> &[StopId] {
        &self.labels[stop].routing_path
    }

    pub fn routing_path_detailed(&self, stop: StopId) -> &[PathSegment] {
        &self.labels[stop].routing_path_detailed
    }

    pub fn preceding_trips(&self, stop: StopId) -> &[TripId] {
        &self.labels[stop].preceding_trips
    }

    pub fn last_trip(&self, stop: StopId) -> Option<TripId> {
        self.labels[stop].preceding_trips.last().copied()
    }

    /// All stops reached so far, in first-reached order.
    pub fn reachable_stops(&self) -> &[StopId] {
        &self.reachable
    }

    pub fn just_updated(&self) -> &[StopId] {
        &self.just_updated
    }

    pub fn set_just_updated(&mut self, stops: Vec<StopId>) {
        self.just_updated = stops;
    }

    pub fn is_already_transferred(&self, stop: StopId) -> bool {
        self.already_transferred.contains(stop)
    }

    /// Merge a set of stops into `already_transferred`. Per spec
    /// §4.3.1, this merges the *previous* `just_updated` set — i.e. the
    /// set that fed this round's trip-scan — not every stop whose
    /// transfers were relaxed this round.
    pub fn merge_already_transferred(&mut self, stops: &[StopId]) {
        for &stop in stops {
            self.already_transferred.insert(stop);
        }
    }
}
