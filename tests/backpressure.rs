// tests/backpressure.rs

use std::error::Error;

use pathwatch::engine::BatchReport;
use pathwatch_test_utils::{init_tracing, FakeEvent, WatcherBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn children(names: &[&str]) -> Vec<FakeEvent> {
    names.iter().map(|n| FakeEvent::child(".", n)).collect()
}

#[test]
fn backlog_drops_rest_of_batch_then_recovers() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .pipe_mode()
        .watch(".")
        .batch(children(&["a", "b", "c"]))
        .batch(children(&["d"]))
        .backlog(0)
        .backlog(5)
        .build();

    let first = watcher.service_batch()?;
    let second = watcher.service_batch()?;

    assert_eq!(
        first,
        BatchReport {
            received: 3,
            matched: 2,
            written: 1,
            dropped: 2,
        }
    );
    assert_eq!(second.written, 1);
    assert_eq!(watcher.sink().lines(), vec!["a".to_string(), "d".to_string()]);
    Ok(())
}

#[test]
fn backlog_on_first_event_writes_nothing_for_that_batch() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .pipe_mode()
        .watch(".")
        .batch(children(&["a", "b"]))
        .batch(children(&["c", "d"]))
        .backlog(1)
        .build();

    watcher.service_batch()?;
    assert!(watcher.sink().lines().is_empty());

    watcher.service_batch()?;
    assert_eq!(watcher.sink().lines(), vec!["c".to_string(), "d".to_string()]);
    Ok(())
}

#[test]
fn unmatched_events_skip_the_backlog_check() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .pipe_mode()
        .watch("pathwatch-wanted")
        .batch(vec![
            FakeEvent::child(".", "noise"),
            FakeEvent::child(".", "pathwatch-wanted"),
        ])
        .build();

    watcher.service_batch()?;

    assert_eq!(watcher.sink().backlog_checks(), 1);
    assert_eq!(watcher.sink().lines(), vec!["pathwatch-wanted".to_string()]);
    Ok(())
}

#[test]
fn backlog_is_ignored_without_pipe_mode() -> TestResult {
    init_tracing();
    let mut watcher = WatcherBuilder::directory()
        .watch(".")
        .batch(children(&["a", "b"]))
        .backlog(100)
        .backlog(100)
        .build();

    let report = watcher.service_batch()?;

    assert_eq!(report.written, 2);
    assert_eq!(watcher.sink().backlog_checks(), 0);
    Ok(())
}
