//! Data model for the timetable: immutable, columnar, indexed at
//! construction time (spec §3, §4.1).

mod timetable;
mod types;

pub use timetable::{BoardingCandidate, Timetable, TimetableBuilder};
pub use types::{
    Direction, PathSegment, Stop, StopId, StopTimeEntry, Time, TransferEdge, Trip, TripId,
    UNREACHABLE,
};
