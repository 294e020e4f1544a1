//! Raw, string-keyed record shapes matching the five columnar tables of
//! spec §6.2. These are what an external GTFS pre-processor (out of
//! scope; see `SPEC_FULL.md` §1) hands to [`super::TimetableBuilder`],
//! and what [`super::csv_loader`] parses from CSV.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::Time;

#[derive(Debug, Clone, Deserialize)]
pub struct StopRecord {
    pub stop_id: String,
    pub stop_name: String,
    #[serde(default)]
    pub parent_station: Option<String>,
    #[serde(default)]
    pub platform_code: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    pub trip_id: String,
    pub route_id: String,
    pub service_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub trip_short_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_sequence: u32,
    pub stop_id: String,
    pub arrival_time: Time,
    pub departure_time: Time,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferRecord {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub transfer_type: u8,
    pub min_transfer_time: Time,
}

/// Unlike the other four tables, `calendar` is not naturally flat CSV
/// (`service_ids` is a list); [`super::csv_loader`] reads it from a
/// `;`-separated column rather than a nested structure.
#[derive(Debug, Clone)]
pub struct CalendarRecord {
    pub calendar_date: NaiveDate,
    pub service_ids: Vec<String>,
}
