//! Immutable, in-memory columnar timetable and the indices the RAPTOR
//! search needs to avoid linear scans (spec §4.1, §9 "Columnar scans →
//! inverted indices").

use chrono::NaiveDate;
use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::info;

use crate::error::TimetableError;
use crate::loading::records::{
    CalendarRecord, StopRecord, StopTimeRecord, TransferRecord, TripRecord,
};

use super::types::{Direction, Stop, StopId, StopTimeEntry, Time, TransferEdge, Trip, TripId};

/// Read-only, shareable public-transit timetable. Built once via
/// [`TimetableBuilder`] and then queried by any number of concurrent
/// RAPTOR searches (spec §5: "safely shared across any number of
/// concurrent queries").
#[derive(Debug)]
pub struct Timetable {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    trips: Vec<Trip>,
    trip_index: HashMap<String, TripId>,
    stop_time_rows: Vec<StopTimeEntry>,
    transfers: Vec<TransferEdge>,
    /// stop -> sorted `(departure, trip, position_in_trip)`, used for
    /// forward `stop_times_at`.
    departures_by_stop: HashMap<StopId, Vec<(Time, TripId, usize)>>,
    /// stop -> sorted `(arrival, trip, position_in_trip)`, used for
    /// reverse `stop_times_at`.
    arrivals_by_stop: HashMap<StopId, Vec<(Time, TripId, usize)>>,
    active_trips_by_date: HashMap<NaiveDate, FixedBitSet>,
    parent_to_stops: HashMap<String, Vec<StopId>>,
}

/// One matching row returned by [`Timetable::stop_times_at`].
#[derive(Debug, Clone, Copy)]
pub struct BoardingCandidate {
    pub trip: TripId,
    /// Position of the boarding stop within the trip's stop pattern
    /// (i.e. an index into `Timetable::stop_times_of_trip(trip)`).
    pub position: usize,
    pub arrival: Time,
    pub departure: Time,
}

impl Timetable {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn resolve_stop(&self, stop_id: &str) -> Option<StopId> {
        self.stop_index.get(stop_id).copied()
    }

    pub fn resolve_trip(&self, trip_id: &str) -> Option<TripId> {
        self.trip_index.get(trip_id).copied()
    }

    pub fn stop(&self, stop: StopId) -> &Stop {
        &self.stops[stop]
    }

    pub fn trip(&self, trip: TripId) -> &Trip {
        &self.trips[trip]
    }

    /// Latitude/longitude of a stop.
    pub fn coordinates(&self, stop: StopId) -> (f64, f64) {
        let s = &self.stops[stop];
        (s.lat, s.lon)
    }

    /// Platform ids sharing `parent_id` as their parent station.
    pub fn stop_ids_of_parent(&self, parent_id: &str) -> &[StopId] {
        self.parent_to_stops
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The trip's full stop pattern, ordered by ascending `stop_sequence`.
    pub fn stop_times_of_trip(&self, trip: TripId) -> &[StopTimeEntry] {
        let t = &self.trips[trip];
        &self.stop_time_rows[t.stops_start..t.stops_start + t.num_stops]
    }

    /// Outgoing foot-transfers from `stop`.
    pub fn outgoing_transfers(&self, stop: StopId) -> &[TransferEdge] {
        let s = &self.stops[stop];
        &self.transfers[s.transfers_start..s.transfers_start + s.transfers_len]
    }

    /// Trips whose `service_id` is active on `date`. `None` means the
    /// calendar has no entry for that date — per spec §7 this is not an
    /// error, it just means no trips are active.
    pub fn active_trip_ids(&self, date: NaiveDate) -> Option<&FixedBitSet> {
        self.active_trips_by_date.get(&date)
    }

    /// Stop-time rows at `stop` that are boardable (forward) or
    /// alightable-from (reverse) relative to `pivot_time`, per spec
    /// §4.1: forward keeps `departure_time >= pivot_time`, reverse keeps
    /// `arrival_time <= pivot_time`.
    pub fn stop_times_at(
        &self,
        stop: StopId,
        direction: Direction,
        pivot_time: Time,
    ) -> Vec<BoardingCandidate> {
        match direction {
            Direction::Forward => {
                let Some(rows) = self.departures_by_stop.get(&stop) else {
                    return Vec::new();
                };
                let start = rows.partition_point(|&(departure, ..)| departure < pivot_time);
                rows[start..]
                    .iter()
                    .map(|&(departure, trip, position)| BoardingCandidate {
                        trip,
                        position,
                        arrival: self.stop_time_rows[self.trips[trip].stops_start + position]
                            .arrival,
                        departure,
                    })
                    .collect()
            }
            Direction::Reverse => {
                let Some(rows) = self.arrivals_by_stop.get(&stop) else {
                    return Vec::new();
                };
                let end = rows.partition_point(|&(arrival, ..)| arrival <= pivot_time);
                rows[..end]
                    .iter()
                    .map(|&(arrival, trip, position)| BoardingCandidate {
                        trip,
                        position,
                        arrival,
                        departure: self.stop_time_rows[self.trips[trip].stops_start + position]
                            .departure,
                    })
                    .collect()
            }
        }
    }
}

/// Incremental constructor for a [`Timetable`], grounded in the teacher
/// crate's `loading::gtfs::processor::transit_model_from_gtfs` (see
/// `DESIGN.md`): group raw rows by their owning trip/stop, sort, then
/// lay out contiguous CSR ranges.
#[derive(Debug, Default)]
pub struct TimetableBuilder;

impl TimetableBuilder {
    /// Build a [`Timetable`] from already-parsed, denormalised rows
    /// matching the five tables of spec §6.2. This is the in-memory
    /// entry point used both by [`crate::loading::csv_loader`] and by
    /// tests constructing hand-built mini-timetables (spec §8 scenarios).
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError`] on duplicate ids, dangling foreign
    /// keys, or out-of-range values (spec §7: "Schema validation
    /// failure ... fatal, surfaced at load time").
    pub fn from_records(
        stops: Vec<StopRecord>,
        trips: Vec<TripRecord>,
        stop_times: Vec<StopTimeRecord>,
        transfers: Vec<TransferRecord>,
        calendar: Vec<CalendarRecord>,
    ) -> Result<Timetable, TimetableError> {
        let (stops_vec, stop_index) = build_stops(stops)?;
        let (mut trips_vec, trip_index) = build_trips(trips)?;

        let (stop_time_rows, departures_by_stop, arrivals_by_stop) =
            build_stop_times(&mut trips_vec, &trip_index, &stop_index, stop_times)?;

        let (transfers_vec, stops_vec) =
            build_transfers(stops_vec, &stop_index, transfers)?;

        let active_trips_by_date = build_calendar(&trips_vec, calendar)?;

        let parent_to_stops = build_parent_index(&stops_vec);

        info!(
            "timetable built: {} stops, {} trips, {} stop_times, {} transfers, {} calendar days",
            stops_vec.len(),
            trips_vec.len(),
            stop_time_rows.len(),
            transfers_vec.len(),
            active_trips_by_date.len(),
        );

        Ok(Timetable {
            stops: stops_vec,
            stop_index,
            trips: trips_vec,
            trip_index,
            stop_time_rows,
            transfers: transfers_vec,
            departures_by_stop,
            arrivals_by_stop,
            active_trips_by_date,
            parent_to_stops,
        })
    }
}

fn build_stops(
    records: Vec<StopRecord>,
) -> Result<(Vec<Stop>, HashMap<String, StopId>), TimetableError> {
    let mut stops = Vec::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        if index.contains_key(&record.stop_id) {
            return Err(TimetableError::DuplicateStop(record.stop_id));
        }
        let id = stops.len();
        index.insert(record.stop_id.clone(), id);
        stops.push(Stop {
            stop_id: record.stop_id,
            stop_name: record.stop_name,
            parent_station: record.parent_station,
            platform_code: record.platform_code,
            lat: record.stop_lat,
            lon: record.stop_lon,
            transfers_start: 0,
            transfers_len: 0,
        });
    }
    Ok((stops, index))
}

fn build_trips(
    records: Vec<TripRecord>,
) -> Result<(Vec<Trip>, HashMap<String, TripId>), TimetableError> {
    let mut trips = Vec::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        if index.contains_key(&record.trip_id) {
            return Err(TimetableError::DuplicateTrip(record.trip_id));
        }
        let id = trips.len();
        index.insert(record.trip_id.clone(), id);
        trips.push(Trip {
            trip_id: record.trip_id,
            route_id: record.route_id,
            service_id: record.service_id,
            headsign: record.trip_headsign,
            short_name: record.trip_short_name,
            stops_start: 0,
            num_stops: 0,
        });
    }
    Ok((trips, index))
}

#[allow(clippy::type_complexity)]
fn build_stop_times(
    trips: &mut [Trip],
    trip_index: &HashMap<String, TripId>,
    stop_index: &HashMap<String, StopId>,
    records: Vec<StopTimeRecord>,
) -> Result<
    (
        Vec<StopTimeEntry>,
        HashMap<StopId, Vec<(Time, TripId, usize)>>,
        HashMap<StopId, Vec<(Time, TripId, usize)>>,
    ),
    TimetableError,
> {
    let mut by_trip: HashMap<TripId, Vec<StopTimeEntry>> = HashMap::new();
    for record in records {
        let trip_id = *trip_index
            .get(&record.trip_id)
            .ok_or(TimetableError::UnknownTrip(record.trip_id))?;
        let stop_id = *stop_index
            .get(&record.stop_id)
            .ok_or(TimetableError::UnknownStop(record.stop_id))?;
        by_trip.entry(trip_id).or_default().push(StopTimeEntry {
            stop: stop_id,
            stop_sequence: record.stop_sequence,
            arrival: record.arrival_time,
            departure: record.departure_time,
        });
    }
    for rows in by_trip.values_mut() {
        rows.sort_by_key(|r| r.stop_sequence);
    }

    let mut stop_time_rows = Vec::new();
    let mut departures_by_stop: HashMap<StopId, Vec<(Time, TripId, usize)>> = HashMap::new();
    let mut arrivals_by_stop: HashMap<StopId, Vec<(Time, TripId, usize)>> = HashMap::new();

    for (trip_id, trip) in trips.iter_mut().enumerate() {
        let Some(rows) = by_trip.remove(&trip_id) else {
            continue;
        };
        trip.stops_start = stop_time_rows.len();
        trip.num_stops = rows.len();
        for (position, row) in rows.into_iter().enumerate() {
            departures_by_stop
                .entry(row.stop)
                .or_default()
                .push((row.departure, trip_id, position));
            arrivals_by_stop
                .entry(row.stop)
                .or_default()
                .push((row.arrival, trip_id, position));
            stop_time_rows.push(row);
        }
    }

    for rows in departures_by_stop.values_mut() {
        rows.sort_by_key(|&(time, ..)| time);
    }
    for rows in arrivals_by_stop.values_mut() {
        rows.sort_by_key(|&(time, ..)| time);
    }

    Ok((stop_time_rows, departures_by_stop, arrivals_by_stop))
}

fn build_transfers(
    mut stops: Vec<Stop>,
    stop_index: &HashMap<String, StopId>,
    records: Vec<TransferRecord>,
) -> Result<(Vec<TransferEdge>, Vec<Stop>), TimetableError> {
    let mut by_stop: HashMap<StopId, Vec<TransferEdge>> = HashMap::new();
    for record in records {
        if record.min_transfer_time <= 0 {
            return Err(TimetableError::InvalidTransferTime(i64::from(
                record.min_transfer_time,
            )));
        }
        let from = *stop_index
            .get(&record.from_stop_id)
            .ok_or(TimetableError::UnknownTransferStop(record.from_stop_id))?;
        let to = *stop_index
            .get(&record.to_stop_id)
            .ok_or(TimetableError::UnknownTransferStop(record.to_stop_id))?;
        by_stop.entry(from).or_default().push(TransferEdge {
            target: to,
            transfer_type: record.transfer_type,
            min_transfer_time: record.min_transfer_time,
        });
    }

    let mut transfers = Vec::new();
    for (stop_id, stop) in stops.iter_mut().enumerate() {
        let Some(edges) = by_stop.remove(&stop_id) else {
            continue;
        };
        stop.transfers_start = transfers.len();
        stop.transfers_len = edges.len();
        transfers.extend(edges);
    }

    Ok((transfers, stops))
}

fn build_calendar(
    trips: &[Trip],
    records: Vec<CalendarRecord>,
) -> Result<HashMap<NaiveDate, FixedBitSet>, TimetableError> {
    let mut trips_by_service: HashMap<&str, Vec<TripId>> = HashMap::new();
    for (trip_id, trip) in trips.iter().enumerate() {
        trips_by_service
            .entry(trip.service_id.as_str())
            .or_default()
            .push(trip_id);
    }

    let mut by_date = HashMap::with_capacity(records.len());
    for record in records {
        if by_date.contains_key(&record.calendar_date) {
            return Err(TimetableError::DuplicateCalendarDate(
                record.calendar_date.to_string(),
            ));
        }
        let mut active = FixedBitSet::with_capacity(trips.len());
        for service_id in &record.service_ids {
            if let Some(ids) = trips_by_service.get(service_id.as_str()) {
                for &trip_id in ids {
                    active.set(trip_id, true);
                }
            }
        }
        by_date.insert(record.calendar_date, active);
    }
    Ok(by_date)
}

fn build_parent_index(stops: &[Stop]) -> HashMap<String, Vec<StopId>> {
    let mut parents: HashMap<String, Vec<StopId>> = HashMap::new();
    for (stop_id, stop) in stops.iter().enumerate() {
        if let Some(parent) = &stop.parent_station {
            parents.entry(parent.clone()).or_default().push(stop_id);
        }
    }
    parents
}
