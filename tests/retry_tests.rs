mod common;
use attendlog::errors::AppError;
use attendlog::store::{RetryPolicy, Retrying, RowStore};
use common::BrokenStore;
use std::io;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn quick(attempts: u32) -> RetryPolicy {
    RetryPolicy {
        attempts,
        backoff: Duration::ZERO,
    }
}

#[test]
fn test_transient_failures_are_retried_until_success() {
    let mut calls = 0;
    let result = quick(3).run("read_all", || {
        calls += 1;
        if calls < 3 {
            Err(AppError::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")))
        } else {
            Ok(calls)
        }
    });

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls, 3);
}

#[test]
fn test_exhausted_retries_become_store_unavailable() {
    let store = Retrying::new(BrokenStore::new(true), quick(4));

    let err = store.read_all("2026-10-18").unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)));
    assert!(err.to_string().contains("4 attempt(s)"));
    assert_eq!(store.inner().calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_permanent_failures_are_not_retried() {
    let store = Retrying::new(BrokenStore::new(false), quick(5));

    let err = store.segments().unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
    assert_eq!(store.inner().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_zero_attempts_still_tries_once() {
    let store = Retrying::new(BrokenStore::new(true), quick(0));

    assert!(matches!(
        store.append_row("2026-10-18", &[]),
        Err(AppError::StoreUnavailable(_))
    ));
    assert_eq!(store.inner().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_ledger_outcomes_pass_through_unchanged() {
    let mut calls = 0;
    let result: Result<(), AppError> = RetryPolicy::default().run("check_in", || {
        calls += 1;
        Err(AppError::AlreadyOpen {
            person: "Alice".into(),
            segment: "2026-10-18".into(),
        })
    });

    assert!(matches!(result, Err(AppError::AlreadyOpen { .. })));
    assert_eq!(calls, 1);
}

#[test]
fn test_transient_classification() {
    assert!(AppError::Io(io::Error::new(io::ErrorKind::Interrupted, "x")).is_transient());
    assert!(AppError::Io(io::Error::new(io::ErrorKind::WouldBlock, "x")).is_transient());
    assert!(!AppError::Io(io::Error::new(io::ErrorKind::NotFound, "x")).is_transient());
    assert!(!AppError::EmptyPerson.is_transient());
    assert!(!AppError::SegmentNotFound("x".into()).is_transient());
}
