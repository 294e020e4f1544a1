//! Convenience re-exports of the public API surface.

pub use crate::error::{QueryError, TimetableError};
pub use crate::loading::from_csv_dir;
pub use crate::model::{
    Direction, PathSegment, Stop, StopId, StopTimeEntry, Time, TimetableBuilder, TransferEdge,
    Trip, TripId,
};
pub use crate::model::Timetable;
pub use crate::query::Query;
pub use crate::routing::{
    IsochroneEntry, JourneyResult, LabelTable, batch_point_to_point, isochrone, journey_to_geojson,
    point_to_point,
};
