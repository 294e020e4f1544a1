//! CSV convenience loader: the concrete, dependency-light instance of
//! "any columnar format" named in spec §6.2. Reads the five tables from
//! a directory of `stops.csv`, `trips.csv`, `stop_times.csv`,
//! `transfers.csv`, `calendar.csv` and hands the parsed rows to
//! [`crate::model::TimetableBuilder::from_records`].

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::TimetableError;
use crate::loading::records::{
    CalendarRecord, StopRecord, StopTimeRecord, TransferRecord, TripRecord,
};
use crate::model::{Timetable, TimetableBuilder};

/// Raw `calendar.csv` row: `service_ids` is a single `;`-separated
/// column rather than a nested structure (spec §6.2).
#[derive(Debug, Deserialize)]
struct CalendarRow {
    calendar_date: NaiveDate,
    service_ids: String,
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, TimetableError> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(TimetableError::from)
}

/// Build a [`Timetable`] from the five CSV files inside `dir`.
///
/// # Errors
///
/// [`TimetableError::Io`]/[`TimetableError::Csv`] on unreadable or
/// malformed files; the [`TimetableError`] variants
/// [`TimetableBuilder::from_records`] itself returns, on invalid data.
pub fn from_csv_dir(dir: &Path) -> Result<Timetable, TimetableError> {
    let stops: Vec<StopRecord> = read_csv(&dir.join("stops.csv"))?;
    let trips: Vec<TripRecord> = read_csv(&dir.join("trips.csv"))?;
    let stop_times: Vec<StopTimeRecord> = read_csv(&dir.join("stop_times.csv"))?;
    let transfers: Vec<TransferRecord> = read_csv(&dir.join("transfers.csv"))?;

    let calendar_rows: Vec<CalendarRow> = read_csv(&dir.join("calendar.csv"))?;
    let calendar = calendar_rows
        .into_iter()
        .map(|row| CalendarRecord {
            calendar_date: row.calendar_date,
            service_ids: row
                .service_ids
                .split(';')
                .map(str::to_string)
                .filter(|s| !s.is_empty())
                .collect(),
        })
        .collect();

    TimetableBuilder::from_records(stops, trips, stop_times, transfers, calendar)
}
