//! Core scalar and record types shared by the timetable and the search.

/// Dense index of a [`Stop`] within a [`super::Timetable`].
pub type StopId = usize;
/// Dense index of a [`Trip`] within a [`super::Timetable`].
pub type TripId = usize;
/// Seconds since midnight of the service day. May exceed `86_400` for
/// past-midnight trips, and is used as a relative elapsed-time value
/// (`time_to_reach`) inside a [`crate::routing::LabelTable`].
pub type Time = i32;

/// Sentinel for "not reached" in a label table; chosen so ordinary
/// arithmetic (`checked_add`) never silently wraps into it.
pub const UNREACHABLE: Time = Time::MAX;

/// Direction of a search: forward (earliest arrival from a departure time)
/// or reverse (latest departure for a required arrival time). See
/// spec §4.3.6 for the substitutions that hold between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    #[must_use]
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}

/// A transit stop (or platform). Stops sharing a `parent_station` are
/// logically interchangeable for boarding purposes.
#[derive(Debug, Clone)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub parent_station: Option<String>,
    pub platform_code: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// CSR offset/length into `Timetable::transfers` for this stop's
    /// outgoing transfers, mirroring the teacher crate's `stops_start`/
    /// `routes_len` layout on `Stop` (see `model/transit/types.rs`).
    pub(crate) transfers_start: usize,
    pub(crate) transfers_len: usize,
}

/// A single scheduled vehicle run.
#[derive(Debug, Clone)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    pub headsign: Option<String>,
    pub short_name: Option<String>,
    /// CSR offset/length into `Timetable::stop_time_rows`, ordered by
    /// ascending `stop_sequence`.
    pub(crate) stops_start: usize,
    pub(crate) num_stops: usize,
}

/// One row of a trip's stop pattern, stored contiguously per trip.
#[derive(Debug, Clone, Copy)]
pub struct StopTimeEntry {
    pub stop: StopId,
    pub stop_sequence: u32,
    pub arrival: Time,
    pub departure: Time,
}

/// A directed foot-transfer edge between two stops.
#[derive(Debug, Clone, Copy)]
pub struct TransferEdge {
    pub target: StopId,
    pub transfer_type: u8,
    pub min_transfer_time: Time,
}

/// One traversed hop in a detailed itinerary: either an in-vehicle
/// segment (`Board`) or a foot transfer (`Walk`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Board {
        trip_id: String,
        stop_sequence: u32,
        stop_id: String,
    },
    Walk {
        stop_sequence: u32,
        stop_id: String,
    },
}
