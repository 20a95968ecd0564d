mod common;
use attendlog::core::{AttendanceLedger, LedgerConfig, ensure_segment};
use attendlog::errors::AppError;
use attendlog::models::{OPEN_SENTINEL, TimePrecision};
use attendlog::store::{MemoryStore, RowStore};
use common::{BrokenStore, at, row};
use std::sync::Arc;
use std::thread;

const SEG: &str = "2026-10-18";

fn ledger() -> AttendanceLedger<MemoryStore> {
    AttendanceLedger::new(Arc::new(MemoryStore::new()), LedgerConfig::default())
}

fn ledger_with(precision: TimePrecision) -> AttendanceLedger<MemoryStore> {
    AttendanceLedger::new(Arc::new(MemoryStore::new()), LedgerConfig { precision })
}

#[test]
fn test_check_in_opens_a_session_and_blocks_a_second_one() {
    let l = ledger();

    assert!(!l.is_open(SEG, "Alice").unwrap());
    let rec = l.check_in(SEG, "Alice", at(SEG, "09:00")).unwrap();

    assert_eq!(rec.date, SEG);
    assert_eq!(rec.check_in, "09:00");
    assert_eq!(rec.check_out, OPEN_SENTINEL);
    assert_eq!(rec.duration, OPEN_SENTINEL);
    assert!(l.is_open(SEG, "Alice").unwrap());

    let err = l.check_in(SEG, "Alice", at(SEG, "09:05")).unwrap_err();
    assert!(matches!(err, AppError::AlreadyOpen { ref person, .. } if person == "Alice"));
    assert_eq!(l.store().read_all(SEG).unwrap().len(), 1);
}

#[test]
fn test_check_in_creates_the_segment_with_header() {
    let l = ledger();
    assert!(!l.store().segment_exists(SEG).unwrap());

    l.check_in(SEG, "Alice", at(SEG, "09:00")).unwrap();

    assert!(l.store().segment_exists(SEG).unwrap());
    assert_eq!(
        l.store().header(SEG).unwrap().unwrap(),
        row(&["Date", "Name", "Check-In", "Check-Out", "Duration"])
    );
}

#[test]
fn test_check_out_without_open_session_fails_and_leaves_segment_untouched() {
    let l = ledger();
    l.check_in(SEG, "Bob", at(SEG, "08:00")).unwrap();
    l.check_out(SEG, "Bob", at(SEG, "09:00")).unwrap();
    let before = l.store().read_all(SEG).unwrap();

    let err = l.check_out(SEG, "Bob", at(SEG, "10:00")).unwrap_err();
    assert!(matches!(err, AppError::NoOpenSession { .. }));

    let err = l.check_out(SEG, "Carol", at(SEG, "10:00")).unwrap_err();
    assert!(matches!(err, AppError::NoOpenSession { .. }));

    assert_eq!(l.store().read_all(SEG).unwrap(), before);
}

#[test]
fn test_check_out_on_missing_segment_is_no_open_session() {
    let l = ledger();
    let err = l.check_out("2026-01-01", "Alice", at("2026-01-01", "10:00")).unwrap_err();
    assert!(matches!(err, AppError::NoOpenSession { .. }));
    assert!(!l.store().segment_exists("2026-01-01").unwrap());
}

#[test]
fn test_round_trip_yields_one_closed_record() {
    let l = ledger();
    l.check_in(SEG, "Alice", at(SEG, "09:00")).unwrap();
    let out = l.check_out(SEG, "Alice", at(SEG, "10:30")).unwrap();

    assert_eq!(out.index, 1);
    assert_eq!(out.elapsed_minutes, 90);
    assert!(!out.wrapped_midnight);

    let records = l.records(SEG).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].check_in, "09:00");
    assert_eq!(records[0].check_out, "10:30");
    assert_eq!(records[0].duration, "1h 30m");
    assert!(!l.is_open(SEG, "Alice").unwrap());
}

#[test]
fn test_duration_formatting() {
    let l = ledger();
    l.check_in(SEG, "A", at(SEG, "09:00")).unwrap();
    l.check_in(SEG, "B", at(SEG, "09:00")).unwrap();

    assert_eq!(l.check_out(SEG, "A", at(SEG, "09:45")).unwrap().record.duration, "0h 45m");
    assert_eq!(l.check_out(SEG, "B", at(SEG, "11:00")).unwrap().record.duration, "2h 0m");
}

#[test]
fn test_minute_precision_drops_seconds_everywhere() {
    let l = ledger();
    let rec = l.check_in(SEG, "Alice", at(SEG, "09:00:59")).unwrap();
    assert_eq!(rec.check_in, "09:00");

    let out = l.check_out(SEG, "Alice", at(SEG, "09:45:01")).unwrap();
    assert_eq!(out.record.check_out, "09:45");
    assert_eq!(out.record.duration, "0h 45m");
}

#[test]
fn test_second_precision_keeps_seconds_but_duration_discards_them() {
    let l = ledger_with(TimePrecision::Seconds);
    let rec = l.check_in(SEG, "Alice", at(SEG, "09:00:30")).unwrap();
    assert_eq!(rec.check_in, "09:00:30");

    let out = l.check_out(SEG, "Alice", at(SEG, "10:00:10")).unwrap();
    assert_eq!(out.record.check_out, "10:00:10");
    assert_eq!(out.record.duration, "0h 59m");
}

#[test]
fn test_check_out_before_check_in_wraps_past_midnight() {
    let l = ledger();
    l.check_in(SEG, "Night", at(SEG, "22:15")).unwrap();
    let out = l.check_out(SEG, "Night", at(SEG, "01:45")).unwrap();

    assert!(out.wrapped_midnight);
    assert_eq!(out.elapsed_minutes, 210);
    assert_eq!(out.record.duration, "3h 30m");
}

#[test]
fn test_parallel_open_sessions_are_independent() {
    let l = ledger();
    l.check_in(SEG, "Alice", at(SEG, "09:00")).unwrap();
    l.check_in(SEG, "Bob", at(SEG, "09:10")).unwrap();
    l.check_in(SEG, "Carol", at(SEG, "09:20")).unwrap();

    l.check_out(SEG, "Bob", at(SEG, "12:10")).unwrap();

    let rows = l.store().read_all(SEG).unwrap();
    assert_eq!(rows[0], row(&[SEG, "Alice", "09:00", "-", "-"]));
    assert_eq!(rows[1], row(&[SEG, "Bob", "09:10", "12:10", "3h 0m"]));
    assert_eq!(rows[2], row(&[SEG, "Carol", "09:20", "-", "-"]));

    assert!(l.is_open(SEG, "Alice").unwrap());
    assert!(!l.is_open(SEG, "Bob").unwrap());
    assert!(l.is_open(SEG, "Carol").unwrap());
    assert_eq!(l.open_sessions(SEG).unwrap().len(), 2);
}

#[test]
fn test_person_can_check_in_again_after_closing() {
    let l = ledger();
    l.check_in(SEG, "Alice", at(SEG, "08:00")).unwrap();
    l.check_out(SEG, "Alice", at(SEG, "12:00")).unwrap();
    l.check_in(SEG, "Alice", at(SEG, "13:00")).unwrap();
    let out = l.check_out(SEG, "Alice", at(SEG, "17:30")).unwrap();

    assert_eq!(out.index, 2);
    assert_eq!(out.record.duration, "4h 30m");
    let records = l.records(SEG).unwrap();
    assert_eq!(records[0].duration, "4h 0m");
    assert_eq!(records[1].duration, "4h 30m");
}

#[test]
fn test_malformed_rows_do_not_block_matching() {
    let store = Arc::new(MemoryStore::new());
    ensure_segment(&*store, SEG).unwrap();
    store.push_raw(SEG, row(&[SEG, "Alice"])).unwrap();
    store.push_raw(SEG, row(&[SEG, "Alice", "not-a-time", "-", "-"])).unwrap();
    store.push_raw(SEG, row(&[SEG, "Alice", "09:00", "-", "-"])).unwrap();
    store.push_raw(SEG, row(&[])).unwrap();

    let l = AttendanceLedger::new(store.clone(), LedgerConfig::default());
    assert!(l.is_open(SEG, "Alice").unwrap());

    let out = l.check_out(SEG, "Alice", at(SEG, "10:00")).unwrap();
    assert_eq!(out.index, 3);
    assert_eq!(out.record.duration, "1h 0m");

    let rows = store.read_all(SEG).unwrap();
    assert_eq!(rows[0], row(&[SEG, "Alice"]));
    assert_eq!(rows[1], row(&[SEG, "Alice", "not-a-time", "-", "-"]));
    assert_eq!(rows[2], row(&[SEG, "Alice", "09:00", "10:00", "1h 0m"]));
    assert_eq!(l.records(SEG).unwrap().len(), 2);
}

#[test]
fn test_open_row_with_unreadable_check_in_still_blocks_a_new_check_in() {
    let store = Arc::new(MemoryStore::new());
    ensure_segment(&*store, SEG).unwrap();
    store.push_raw(SEG, row(&[SEG, "Alice", "9am", "-", "-"])).unwrap();

    let l = AttendanceLedger::new(store.clone(), LedgerConfig::default());
    assert!(l.is_open(SEG, "Alice").unwrap());
    assert!(matches!(
        l.check_in(SEG, "Alice", at(SEG, "10:00")),
        Err(AppError::AlreadyOpen { .. })
    ));
    assert_eq!(store.read_all(SEG).unwrap().len(), 1);
    assert_eq!(l.open_sessions(SEG).unwrap().len(), 1);

    // There is nothing it could be closed against, though.
    assert!(matches!(
        l.check_out(SEG, "Alice", at(SEG, "11:00")),
        Err(AppError::NoOpenSession { .. })
    ));
}

#[test]
fn test_session_spanning_days_keeps_its_full_length() {
    let seg = "Week-2026-10-12";
    let l = ledger();
    l.check_in(seg, "Alice", at("2026-10-12", "09:00")).unwrap();

    let out = l.check_out(seg, "Alice", at("2026-10-14", "10:00")).unwrap();
    assert_eq!(out.elapsed_minutes, 49 * 60);
    assert_eq!(out.record.duration, "49h 0m");
    assert!(!out.wrapped_midnight);
}

#[test]
fn test_overnight_session_across_dates_is_not_a_wrap() {
    let seg = "Week-2026-10-12";
    let l = ledger();
    l.check_in(seg, "Night", at("2026-10-12", "22:15")).unwrap();

    let out = l.check_out(seg, "Night", at("2026-10-13", "01:45")).unwrap();
    assert_eq!(out.record.duration, "3h 30m");
    assert!(!out.wrapped_midnight);
}

#[test]
fn test_stored_names_are_matched_verbatim() {
    let store = Arc::new(MemoryStore::new());
    ensure_segment(&*store, SEG).unwrap();
    store.push_raw(SEG, row(&[SEG, " Alice", "09:00", "-", "-"])).unwrap();

    let l = AttendanceLedger::new(store.clone(), LedgerConfig::default());
    assert!(!l.is_open(SEG, "Alice").unwrap());
    assert!(matches!(
        l.check_out(SEG, "Alice", at(SEG, "10:00")),
        Err(AppError::NoOpenSession { .. })
    ));

    let out = l.check_out(SEG, " Alice", at(SEG, "10:00")).unwrap();
    assert_eq!(out.record.person, " Alice");
    assert_eq!(out.record.duration, "1h 0m");
}

#[test]
fn test_four_column_row_gets_a_duration_column_on_close() {
    let store = Arc::new(MemoryStore::new());
    ensure_segment(&*store, SEG).unwrap();
    store.push_raw(SEG, row(&[SEG, "Dan", "14:00", "-"])).unwrap();

    let l = AttendanceLedger::new(store.clone(), LedgerConfig::default());
    l.check_out(SEG, "Dan", at(SEG, "15:05")).unwrap();

    assert_eq!(
        store.read_all(SEG).unwrap()[0],
        row(&[SEG, "Dan", "14:00", "15:05", "1h 5m"])
    );
}

#[test]
fn test_only_first_open_record_is_closed() {
    let store = Arc::new(MemoryStore::new());
    ensure_segment(&*store, SEG).unwrap();
    store.push_raw(SEG, row(&[SEG, "Eve", "08:00", "-", "-"])).unwrap();
    store.push_raw(SEG, row(&[SEG, "Eve", "09:00", "-", "-"])).unwrap();

    let l = AttendanceLedger::new(store.clone(), LedgerConfig::default());
    l.check_out(SEG, "Eve", at(SEG, "10:00")).unwrap();

    let rows = store.read_all(SEG).unwrap();
    assert_eq!(rows[0][3], "10:00");
    assert_eq!(rows[0][4], "2h 0m");
    assert_eq!(rows[1][3], "-");
}

#[test]
fn test_names_match_exactly() {
    let l = ledger();
    l.check_in(SEG, "Alice", at(SEG, "09:00")).unwrap();

    assert!(!l.is_open(SEG, "alice").unwrap());
    assert!(matches!(
        l.check_out(SEG, "Alice Smith", at(SEG, "10:00")),
        Err(AppError::NoOpenSession { .. })
    ));
}

#[test]
fn test_empty_person_is_rejected() {
    let l = ledger();
    assert!(matches!(
        l.check_in(SEG, "   ", at(SEG, "09:00")),
        Err(AppError::EmptyPerson)
    ));
}

#[test]
fn test_segments_are_independent() {
    let l = ledger();
    l.check_in("2026-10-18", "Alice", at("2026-10-18", "09:00")).unwrap();

    assert!(!l.is_open("2026-10-19", "Alice").unwrap());
    l.check_in("2026-10-19", "Alice", at("2026-10-19", "09:00")).unwrap();
    assert!(l.is_open("2026-10-18", "Alice").unwrap());
}

#[test]
fn test_concurrent_check_ins_for_one_person_open_one_session() {
    let l = Arc::new(ledger());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let l = Arc::clone(&l);
            thread::spawn(move || {
                l.check_in(SEG, "Alice", at(SEG, &format!("09:{:02}", i)))
                    .is_ok()
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(l.open_sessions(SEG).unwrap().len(), 1);
}

#[test]
fn test_concurrent_check_ins_for_different_people_all_land() {
    let l = Arc::new(ledger());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let l = Arc::clone(&l);
            thread::spawn(move || l.check_in(SEG, &format!("Person {i}"), at(SEG, "09:00")))
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    assert_eq!(l.records(SEG).unwrap().len(), 10);
}

#[test]
fn test_store_failures_surface_as_store_unavailable() {
    let l = AttendanceLedger::new(Arc::new(BrokenStore::new(false)), LedgerConfig::default());

    assert!(matches!(l.is_open(SEG, "Alice"), Err(AppError::StoreUnavailable(_))));
    assert!(matches!(
        l.check_in(SEG, "Alice", at(SEG, "09:00")),
        Err(AppError::StoreUnavailable(_))
    ));
    assert!(matches!(
        l.check_out(SEG, "Alice", at(SEG, "10:00")),
        Err(AppError::StoreUnavailable(_))
    ));
}

#[test]
fn test_ledger_is_usable_after_a_failed_submission() {
    let l = ledger();
    assert!(l.check_out(SEG, "Alice", at(SEG, "10:00")).is_err());
    assert!(l.check_in(SEG, "Alice", at(SEG, "10:05")).is_ok());
}
