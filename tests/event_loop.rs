// tests/event_loop.rs

mod common;
use crate::common::path_str;

use std::error::Error;
use std::fs;

use pathwatch::engine::BatchReport;
use pathwatch::errors::PathwatchError;
use pathwatch_test_utils::{init_tracing, FakeEvent, WatcherBuilder};
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn child_of_registered_directory_is_reported() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let d = path_str(dir.path());

    let mut watcher = WatcherBuilder::directory()
        .watch(d.as_str())
        .batch(vec![FakeEvent::child(&d, "f")])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec![format!("{d}/f")]);
    Ok(())
}

#[test]
fn unregistered_sibling_is_not_reported() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let d = path_str(dir.path());
    let f = format!("{d}/f");

    let mut watcher = WatcherBuilder::directory()
        .watch(f.as_str())
        .batch(vec![FakeEvent::child(&d, "g"), FakeEvent::child(&d, "f")])
        .build();

    let report = watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec![f]);
    assert_eq!(
        report,
        BatchReport {
            received: 2,
            matched: 1,
            written: 1,
            dropped: 0,
        }
    );
    Ok(())
}

#[test]
fn current_directory_children_print_without_prefix() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .watch(".")
        .batch(vec![FakeEvent::child(".", "x")])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec!["x".to_string()]);
    Ok(())
}

#[test]
fn dot_slash_and_bare_names_are_distinct() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .watch("./pathwatch-only-this")
        .batch(vec![FakeEvent::child(".", "pathwatch-only-this")])
        .build();

    watcher.service_batch()?;

    assert!(watcher.sink().lines().is_empty());
    Ok(())
}

#[test]
fn duplicate_registration_emits_one_record_per_change() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .watch("pathwatch-twice")
        .watch("pathwatch-twice")
        .batch(vec![FakeEvent::child(".", "pathwatch-twice")])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec!["pathwatch-twice".to_string()]);
    assert_eq!(watcher.watch_set().len(), 1);
    Ok(())
}

#[test]
fn trailing_slash_directory_registration_still_matches_children() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let d = format!("{}/", path_str(dir.path()));

    let mut watcher = WatcherBuilder::directory()
        .watch(d.as_str())
        .batch(vec![FakeEvent::child(&d, "f")])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec![format!("{d}f")]);
    Ok(())
}

#[test]
fn deletion_is_prefixed_when_enabled() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .deletions()
        .watch("pathwatch-gone")
        .batch(vec![
            FakeEvent::child(".", "pathwatch-gone"),
            FakeEvent::child_deleted(".", "pathwatch-gone"),
        ])
        .build();

    watcher.service_batch()?;

    assert_eq!(
        watcher.sink().lines(),
        vec!["pathwatch-gone".to_string(), "- pathwatch-gone".to_string()]
    );
    Ok(())
}

#[test]
fn deletions_are_not_delivered_unless_armed() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .watch("pathwatch-gone")
        .batch(vec![FakeEvent::child_deleted(".", "pathwatch-gone")])
        .batch(vec![FakeEvent::child(".", "pathwatch-gone")])
        .build();

    let first = watcher.service_batch()?;
    watcher.service_batch()?;

    assert_eq!(first.matched, 0);
    assert_eq!(watcher.sink().lines(), vec!["pathwatch-gone".to_string()]);
    Ok(())
}

#[test]
fn deleting_a_watched_directory_reports_it() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let d = path_str(dir.path());

    let mut watcher = WatcherBuilder::directory()
        .deletions()
        .watch(d.as_str())
        .batch(vec![FakeEvent::Child {
            dir: d.as_str().into(),
            name: Vec::new(),
            delete: true,
        }])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec![format!("- {d}")]);
    Ok(())
}

#[test]
fn file_granularity_echoes_the_registered_path() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let f = path_str(&dir.path().join("f"));
    fs::write(&f, b"x")?;

    let mut watcher = WatcherBuilder::file()
        .deletions()
        .watch(f.as_str())
        .batch(vec![FakeEvent::file(&f), FakeEvent::file_deleted(&f)])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().lines(), vec![f.clone(), format!("- {f}")]);
    Ok(())
}

#[test]
fn invalidated_watches_are_skipped_and_forgotten() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let d = path_str(dir.path());

    let mut watcher = WatcherBuilder::directory()
        .watch(d.as_str())
        .batch(vec![FakeEvent::child(&d, "a"), FakeEvent::invalidated(&d)])
        .batch(vec![FakeEvent::child(&d, "b")])
        .build();

    let first = watcher.service_batch()?;
    let second = watcher.service_batch()?;

    assert_eq!(first.received, 1);
    assert_eq!(second.matched, 0);
    assert!(!watcher.registry().has_watch(&d));
    assert_eq!(watcher.sink().lines(), vec![format!("{d}/a")]);
    Ok(())
}

#[test]
fn nul_mode_terminates_records_with_nul() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .nul_delimited()
        .watch(".")
        .batch(vec![FakeEvent::child(".", "a b"), FakeEvent::child(".", "c\nd")])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().bytes(), b"a b\0c\nd\0");
    assert_eq!(watcher.sink().flushes(), 2);
    Ok(())
}

#[test]
fn closed_event_stream_is_fatal() {
    init_tracing();
    let mut watcher = WatcherBuilder::directory().watch(".").build();

    let err = watcher.service_batch().unwrap_err();

    assert!(matches!(err, PathwatchError::EventStreamClosed(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn run_returns_the_fatal_error() {
    init_tracing();
    let watcher = WatcherBuilder::directory()
        .watch(".")
        .batch(vec![FakeEvent::child(".", "x")])
        .build();

    let err = match watcher.run() {
        Ok(never) => match never {},
        Err(err) => err,
    };

    assert!(matches!(err, PathwatchError::EventStreamClosed(_)));
}
