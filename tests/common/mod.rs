//! Hand-built mini-timetable fixtures shared by the scenario tests
//! (spec §8 "Scenarios").

use chrono::NaiveDate;
use transit_raptor::loading::records::{
    CalendarRecord, StopRecord, StopTimeRecord, TransferRecord, TripRecord,
};
use transit_raptor::model::{Time, Timetable, TimetableBuilder};

pub const SERVICE_DATE: &str = "2026-07-27";

pub fn stop(stop_id: &str) -> StopRecord {
    StopRecord {
        stop_id: stop_id.to_string(),
        stop_name: format!("Stop {stop_id}"),
        parent_station: None,
        platform_code: None,
        stop_lat: 0.0,
        stop_lon: 0.0,
    }
}

pub fn trip(trip_id: &str) -> TripRecord {
    TripRecord {
        trip_id: trip_id.to_string(),
        route_id: format!("route-{trip_id}"),
        service_id: "weekday".to_string(),
        trip_headsign: None,
        trip_short_name: None,
    }
}

pub fn stop_time(trip_id: &str, stop_sequence: u32, stop_id: &str, arrival: Time, departure: Time) -> StopTimeRecord {
    StopTimeRecord {
        trip_id: trip_id.to_string(),
        stop_sequence,
        stop_id: stop_id.to_string(),
        arrival_time: arrival,
        departure_time: departure,
    }
}

pub fn transfer(from_stop_id: &str, to_stop_id: &str, min_transfer_time: Time) -> TransferRecord {
    TransferRecord {
        from_stop_id: from_stop_id.to_string(),
        to_stop_id: to_stop_id.to_string(),
        transfer_type: 2,
        min_transfer_time,
    }
}

fn calendar() -> Vec<CalendarRecord> {
    vec![CalendarRecord {
        calendar_date: SERVICE_DATE.parse::<NaiveDate>().unwrap(),
        service_ids: vec!["weekday".to_string()],
    }]
}

/// Scenario 1 — a single direct trip from A to B.
pub fn direct_trip_timetable() -> Timetable {
    TimetableBuilder::from_records(
        vec![stop("A"), stop("B")],
        vec![trip("t1")],
        vec![
            stop_time("t1", 1, "A", 30_000, 30_000),
            stop_time("t1", 2, "B", 30_600, 30_600),
        ],
        vec![],
        calendar(),
    )
    .expect("fixture timetable must build")
}

/// Scenarios 2, 5, 6 — one transfer at a shared stop X between trips
/// t1 (A→X) and t2 (X→B).
pub fn one_transfer_timetable() -> Timetable {
    TimetableBuilder::from_records(
        vec![stop("A"), stop("X"), stop("B")],
        vec![trip("t1"), trip("t2")],
        vec![
            stop_time("t1", 1, "A", 28_800, 28_800),
            stop_time("t1", 2, "X", 29_400, 29_400),
            stop_time("t2", 1, "X", 29_700, 29_700),
            stop_time("t2", 2, "B", 30_300, 30_300),
        ],
        vec![],
        calendar(),
    )
    .expect("fixture timetable must build")
}

/// Scenario 3 — like scenario 2, but the shared stop is split into X1/X2
/// connected by a 60-second foot transfer.
pub fn foot_transfer_timetable() -> Timetable {
    TimetableBuilder::from_records(
        vec![stop("A"), stop("X1"), stop("X2"), stop("B")],
        vec![trip("t1"), trip("t2")],
        vec![
            stop_time("t1", 1, "A", 28_800, 28_800),
            stop_time("t1", 2, "X1", 29_400, 29_400),
            stop_time("t2", 1, "X2", 29_760, 29_760),
            stop_time("t2", 2, "B", 30_400, 30_400),
        ],
        vec![transfer("X1", "X2", 60)],
        calendar(),
    )
    .expect("fixture timetable must build")
}

/// Scenario 4 — stop C shares no trip and no transfer with A or B.
pub fn unreachable_timetable() -> Timetable {
    TimetableBuilder::from_records(
        vec![stop("A"), stop("B"), stop("C")],
        vec![trip("t1")],
        vec![
            stop_time("t1", 1, "A", 28_800, 28_800),
            stop_time("t1", 2, "B", 29_400, 29_400),
        ],
        vec![],
        calendar(),
    )
    .expect("fixture timetable must build")
}
