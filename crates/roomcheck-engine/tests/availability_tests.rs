//! Tests for per-classroom availability queries.

use roomcheck_engine::availability::{query, AvailabilityEngine};
use roomcheck_engine::config::{CollegeHours, EngineConfig};
use roomcheck_engine::error::{QueryError, RoomcheckError};
use roomcheck_engine::occupancy::OccupancyVerdict;
use roomcheck_engine::record::TimetableRecord;
use roomcheck_engine::report::{DayCoverage, RoomFilter};
use roomcheck_engine::slot::{DotRange, SlotResolver};
use roomcheck_engine::{BoundaryMode, TimetableSnapshot};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn record(
    dept: &str,
    room: &str,
    day: &str,
    slot: &str,
    subject: &str,
    faculty: &str,
) -> TimetableRecord {
    TimetableRecord::new(dept, room, day, slot, subject, faculty)
}

/// The two-room Monday example: 101 has DBMS, 102 has nothing.
fn monday_records() -> Vec<TimetableRecord> {
    vec![
        record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
        record("CS", "102", "Monday", "8:50-9:40", "", ""),
    ]
}

fn occupied(subject: &str, faculty: &str) -> OccupancyVerdict {
    OccupancyVerdict::Occupied {
        subject: subject.to_string(),
        faculty: Some(faculty.to_string()),
    }
}

// ── Test 1: End-to-end example ──────────────────────────────────────────────

#[test]
fn occupied_and_free_rooms_at_nine() {
    let report = query("Monday", "9:00", &monday_records()).unwrap();

    assert_eq!(report.coverage, DayCoverage::Scheduled);
    assert_eq!(report.rooms.len(), 2);
    assert_eq!(report.room("CS", "101").unwrap().verdict, occupied("DBMS", "Rao"));
    assert_eq!(report.room("CS", "102").unwrap().verdict, OccupancyVerdict::Free);
    assert_eq!(report.instant.to_string(), "09:00");
}

#[test]
fn report_renders_text_lines() {
    let report = query("Monday", "9:00", &monday_records()).unwrap();

    assert_eq!(
        report.to_string(),
        "At 09:00 on Monday:\n\
         - CS 101 [08:50-09:40] -> OCCUPIED (DBMS, Rao)\n\
         - CS 102 [08:50-09:40] -> FREE"
    );
}

// ── Test 2: Boundaries ──────────────────────────────────────────────────────

#[test]
fn inclusive_boundaries_by_default() {
    let records = monday_records();

    let at_start = query("Monday", "8:50", &records).unwrap();
    assert!(!at_start.room("CS", "101").unwrap().verdict.is_free());

    let at_end = query("Monday", "9:40", &records).unwrap();
    assert!(!at_end.room("CS", "101").unwrap().verdict.is_free());

    let after = query("Monday", "9:41", &records).unwrap();
    let room = after.room("CS", "101").unwrap();
    assert!(room.verdict.is_free());
    assert_eq!(room.interval, None);
}

#[test]
fn half_open_boundaries_exclude_end_minute() {
    let engine = AvailabilityEngine::new().with_boundary(BoundaryMode::HalfOpen);
    assert_eq!(engine.boundary(), BoundaryMode::HalfOpen);
    let records = monday_records();

    let at_start = engine.query("Monday", "8:50", &records).unwrap();
    assert!(!at_start.room("CS", "101").unwrap().verdict.is_free());

    let at_end = engine.query("Monday", "9:40", &records).unwrap();
    let room = at_end.room("CS", "101").unwrap();
    assert!(room.verdict.is_free());
    assert_eq!(room.interval, None);
}

// ── Test 3: Day matching and no-data ────────────────────────────────────────

#[test]
fn day_matches_case_insensitively() {
    for day in ["monday", "MONDAY", "  Monday "] {
        let report = query(day, "9:00", &monday_records()).unwrap();
        assert_eq!(report.coverage, DayCoverage::Scheduled, "day {:?}", day);
        assert_eq!(report.occupied_rooms().count(), 1);
    }
}

#[test]
fn day_without_records_is_no_data() {
    let report = query("Sunday", "9:00", &monday_records()).unwrap();

    assert!(report.is_no_data());
    assert!(report.rooms.is_empty());
    assert_eq!(report.to_string(), "No data available for Sunday.");
}

#[test]
fn empty_record_set_is_no_data() {
    let report = query("Monday", "9:00", &[]).unwrap();
    assert_eq!(report.coverage, DayCoverage::NoData);
}

// ── Test 4: Invalid query input ─────────────────────────────────────────────

#[test]
fn unparseable_time_is_invalid_query() {
    let err = query("Monday", "abc", &monday_records()).unwrap_err();
    assert_eq!(err, QueryError::InvalidTime("abc".to_string()));
    assert_eq!(err.to_string(), "Invalid time input: abc");
}

#[test]
fn blank_day_is_invalid_query() {
    let err = query("  ", "9:00", &monday_records()).unwrap_err();
    assert_eq!(err, QueryError::EmptyDay);
}

// ── Test 5: Room enumeration ────────────────────────────────────────────────

#[test]
fn rooms_from_other_days_are_reported_free_without_interval() {
    let mut records = monday_records();
    records.push(record("CS", "103", "Tuesday", "8:50-9:40", "OS", "Iyer"));

    let report = query("Monday", "9:00", &records).unwrap();

    let rooms: Vec<String> = report.rooms.iter().map(|r| r.key.to_string()).collect();
    assert_eq!(rooms, vec!["CS 101", "CS 102", "CS 103"]);

    let tuesday_room = report.room("CS", "103").unwrap();
    assert!(tuesday_room.verdict.is_free());
    assert_eq!(tuesday_room.interval, None);
    assert!(report.to_string().ends_with("- CS 103 -> FREE"));
}

#[test]
fn each_room_reported_once_in_first_seen_order() {
    let records = vec![
        record("EEE", "E2", "Monday", "8:50-9:40", "Circuits", "Nair"),
        record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
        record("EEE", "E2", "Monday", "9:40-10:30", "Machines", "Nair"),
        record("CS", "101", "Monday", "9:40-10:30", "OS", "Iyer"),
    ];

    let report = query("Monday", "10:00", &records).unwrap();

    assert_eq!(report.rooms.len(), 2);
    assert_eq!(report.rooms[0].key.department, "EEE");
    assert_eq!(report.rooms[1].key.department, "CS");
    assert_eq!(
        report.room("CS", "101").unwrap().verdict.label().as_deref(),
        Some("OS, Iyer")
    );
}

#[test]
fn same_room_label_in_two_departments_is_two_rooms() {
    let records = vec![
        record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
        record("CIVIL", "101", "Monday", "8:50-9:40", "", ""),
    ];

    let report = query("Monday", "9:00", &records).unwrap();

    assert_eq!(report.rooms.len(), 2);
    assert!(!report.room("CS", "101").unwrap().verdict.is_free());
    assert!(report.room("CIVIL", "101").unwrap().verdict.is_free());
}

// ── Test 6: Robustness ──────────────────────────────────────────────────────

#[test]
fn malformed_slot_does_not_abort_query() {
    let mut records = monday_records();
    records.push(record("CS", "104", "Monday", "TBD", "Compilers", "Menon"));
    records.push(record("CS", "105", "Monday", "break", "Break", ""));

    let report = query("Monday", "9:00", &records).unwrap();

    assert_eq!(report.rooms.len(), 4);
    assert!(report.room("CS", "104").unwrap().verdict.is_free());
    assert_eq!(report.room("CS", "104").unwrap().interval, None);
    assert!(report.room("CS", "105").unwrap().verdict.is_free());
}

#[test]
fn custom_resolver_limits_recognized_slots() {
    let records = vec![
        record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
        record("CS", "102", "Monday", "8.50 - 9.40", "OS", "Iyer"),
    ];
    let engine =
        AvailabilityEngine::new().with_resolver(SlotResolver::with_formats(vec![&DotRange]));

    let report = engine.query("Monday", "9:00", &records).unwrap();

    // The colon slot is no longer recognized, so 101 has no matching period.
    let colon_room = report.room("CS", "101").unwrap();
    assert!(colon_room.verdict.is_free());
    assert_eq!(colon_room.interval, None);
    assert_eq!(report.room("CS", "102").unwrap().verdict, occupied("OS", "Iyer"));
}

#[test]
fn overlapping_records_last_one_wins() {
    let records = vec![
        record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
        record("CS", "101", "Monday", "9:00-9:50", "Networks", "Pillai"),
    ];

    let report = query("Monday", "9:10", &records).unwrap();
    let room = report.room("CS", "101").unwrap();

    assert_eq!(room.verdict, occupied("Networks", "Pillai"));
    assert_eq!(room.raw_slot.as_deref(), Some("9:00-9:50"));
}

#[test]
fn afternoon_query_matches_prefixed_dot_slot() {
    let records = vec![record("DS", "D1", "Friday", "S2.05pm - 2.55pm", "ML", "Das")];

    let report = query("Friday", "2:10", &records).unwrap();
    assert_eq!(report.room("DS", "D1").unwrap().verdict, occupied("ML", "Das"));
}

// ── Test 7: Filters and blocks ──────────────────────────────────────────────

#[test]
fn filters_select_free_or_occupied_rows() {
    let report = query("Monday", "9:00", &monday_records()).unwrap();

    let free: Vec<_> = report.free_rooms().map(|r| r.key.classroom.as_str()).collect();
    let occupied: Vec<_> = report.occupied_rooms().map(|r| r.key.classroom.as_str()).collect();
    assert_eq!(free, vec!["102"]);
    assert_eq!(occupied, vec!["101"]);

    assert_eq!(
        report.render(RoomFilter::Free),
        "At 09:00 on Monday:\n- CS 102 [08:50-09:40] -> FREE"
    );
    assert_eq!(report.filtered(RoomFilter::Occupied).rooms.len(), 1);
}

#[test]
fn empty_filter_result_is_reported() {
    let records = vec![record("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao")];
    let report = query("Monday", "9:00", &records).unwrap();

    assert_eq!(
        report.render(RoomFilter::Free),
        "At 09:00 on Monday:\nNo free classrooms."
    );
}

#[test]
fn block_label_is_rendered() {
    let records =
        vec![record("CIVIL", "201", "Monday", "8.50 - 9.40", "Surveying", "Kumar").with_block("B2")];

    let report = query("Monday", "9:00", &records).unwrap();
    assert_eq!(
        report.to_string(),
        "At 09:00 on Monday:\n- CIVIL B2 201 [08:50-09:40] -> OCCUPIED (Surveying, Kumar)"
    );
}

// ── Test 8: Configuration ───────────────────────────────────────────────────

#[test]
fn department_with_morning_pm_correction() {
    let records = vec![
        record("CIVIL", "201", "Monday", "S9.00pm - 9.50pm", "Surveying", "Kumar"),
        record("CS", "101", "Monday", "S9.00pm - 9.50pm", "Night Lab", "Rao"),
    ];
    let config = EngineConfig {
        morning_pm_departments: vec!["civil".to_string()],
        ..EngineConfig::default()
    };
    let engine = AvailabilityEngine::from_config(&config).unwrap();

    let report = engine.query("Monday", "9:30", &records).unwrap();
    assert!(!report.room("CIVIL", "201").unwrap().verdict.is_free());
    assert!(report.room("CS", "101").unwrap().verdict.is_free());

    let plain = query("Monday", "9:30", &records).unwrap();
    assert!(plain.room("CIVIL", "201").unwrap().verdict.is_free());
}

#[test]
fn college_hours_close_the_report() {
    let config = EngineConfig {
        college_hours: Some(CollegeHours {
            open: "8:00".to_string(),
            close: "16:35".to_string(),
        }),
        ..EngineConfig::default()
    };
    let engine = AvailabilityEngine::from_config(&config).unwrap();
    let records = monday_records();

    let late = engine.query("Monday", "4:40", &records).unwrap();
    assert_eq!(late.coverage, DayCoverage::Closed);
    assert_eq!(late.to_string(), "College over - no classes at 16:40.");

    let open = engine.query("Monday", "4:35", &records).unwrap();
    assert_eq!(open.coverage, DayCoverage::Scheduled);

    let early = engine.query("Monday", "7:30am", &records).unwrap();
    assert_eq!(early.coverage, DayCoverage::Closed);
}

#[test]
fn invalid_college_hours_are_rejected() {
    let config = EngineConfig {
        college_hours: Some(CollegeHours {
            open: "late".to_string(),
            close: "16:35".to_string(),
        }),
        ..EngineConfig::default()
    };

    let err = AvailabilityEngine::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        RoomcheckError::ConfigValue {
            field: "college_hours.open",
            ..
        }
    ));
}

#[test]
fn custom_free_markers_from_config() {
    let records = vec![record("CS", "101", "Monday", "8:50-9:40", "Library", "")];
    let config = EngineConfig {
        free_markers: Some(vec!["library".to_string()]),
        ..EngineConfig::default()
    };
    let engine = AvailabilityEngine::from_config(&config).unwrap();

    let report = engine.query("Monday", "9:00", &records).unwrap();
    assert!(report.room("CS", "101").unwrap().verdict.is_free());
}

// ── Test 9: Snapshots ───────────────────────────────────────────────────────

#[test]
fn query_over_snapshot_matches_slice_query() {
    let snapshot = TimetableSnapshot::new(monday_records());
    let engine = AvailabilityEngine::new();

    let from_snapshot = engine.query_snapshot("Monday", "9:00", &snapshot).unwrap();
    let from_slice = engine.query("Monday", "9:00", &monday_records()).unwrap();
    assert_eq!(from_snapshot, from_slice);
}

#[test]
fn report_serializes_to_json() {
    let report = query("Monday", "9:00", &monday_records()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["coverage"], "scheduled");
    assert_eq!(json["instant"], "09:00");
    assert_eq!(json["rooms"][0]["key"]["classroom"], "101");
    assert_eq!(json["rooms"][0]["interval"]["start"], "08:50");
    assert_eq!(json["rooms"][0]["verdict"]["status"], "occupied");
    assert_eq!(json["rooms"][0]["raw_slot"], "8:50-9:40");
}
