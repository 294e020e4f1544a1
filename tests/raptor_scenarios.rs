//! The six hand-built scenarios of spec §8, plus the forward/reverse
//! round-trip property built from scenario 2's timetable.

mod common;

use transit_raptor::prelude::*;

#[test]
fn direct_trip() {
    let timetable = common::direct_trip_timetable();
    let query = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        30_000,
        0,
        false,
        None,
    )
    .unwrap();

    let journey = point_to_point(&timetable, &query).unwrap().unwrap();
    assert_eq!(journey.time_to_reach, 600);
    assert_eq!(journey.routing_path, vec!["A", "B"]);
}

#[test]
fn one_transfer() {
    let timetable = common::one_transfer_timetable();
    let query = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        28_800,
        1,
        false,
        None,
    )
    .unwrap();

    let journey = point_to_point(&timetable, &query).unwrap().unwrap();
    assert_eq!(journey.time_to_reach, 1_500);
    assert_eq!(journey.routing_path, vec!["A", "X", "B"]);
}

#[test]
fn foot_transfer() {
    let timetable = common::foot_transfer_timetable();
    let query = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        28_800,
        1,
        false,
        None,
    )
    .unwrap();

    let journey = point_to_point(&timetable, &query).unwrap().unwrap();
    assert_eq!(journey.time_to_reach, 1_600);
    assert!(
        journey
            .routing_path_detailed
            .iter()
            .any(|segment| matches!(segment, PathSegment::Walk { stop_id, .. } if stop_id == "X2"))
    );
}

#[test]
fn unreachable() {
    let timetable = common::unreachable_timetable();
    let query = Query::new(
        vec!["A".into()],
        vec!["C".into()],
        common::SERVICE_DATE,
        28_800,
        1,
        false,
        None,
    )
    .unwrap();

    assert!(point_to_point(&timetable, &query).unwrap().is_none());
}

#[test]
fn reverse_search() {
    let timetable = common::one_transfer_timetable();
    let query = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        30_300,
        1,
        true,
        None,
    )
    .unwrap();

    let journey = point_to_point(&timetable, &query).unwrap().unwrap();
    assert_eq!(journey.time_to_reach, 1_500);
    assert_eq!(journey.routing_path, vec!["A", "X", "B"]);
}

#[test]
fn isochrone_from_a() {
    let timetable = common::one_transfer_timetable();
    let query = Query::new(vec!["A".into()], vec![], common::SERVICE_DATE, 28_800, 1, false, None).unwrap();

    let entries = isochrone(&timetable, &query).unwrap();
    let by_stop: std::collections::HashMap<_, _> = entries
        .into_iter()
        .map(|entry| (entry.stop_id, entry.time_to_reach))
        .collect();

    assert_eq!(by_stop.get("A"), Some(&0));
    assert_eq!(by_stop.get("X"), Some(&600));
    assert_eq!(by_stop.get("B"), Some(&1_500));
}

#[test]
fn forward_reverse_round_trip() {
    let timetable = common::one_transfer_timetable();
    let departure = 28_800;

    let forward = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        departure,
        1,
        false,
        None,
    )
    .unwrap();
    let forward_journey = point_to_point(&timetable, &forward).unwrap().unwrap();
    let arrival = departure + forward_journey.time_to_reach;

    let reverse = Query::new(
        vec!["A".into()],
        vec!["B".into()],
        common::SERVICE_DATE,
        arrival,
        1,
        true,
        None,
    )
    .unwrap();
    let reverse_journey = point_to_point(&timetable, &reverse).unwrap().unwrap();

    assert_eq!(reverse_journey.time_to_reach, arrival - departure);
}
