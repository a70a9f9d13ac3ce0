// src/engine/mod.rs

//! The watcher context and its event loop.
//!
//! Registration and servicing are two strictly ordered phases:
//! [`Watcher::register`] is called for every path first, then
//! [`Watcher::run`] consumes the watcher and loops until a fatal error.
//!
//! The synchronous core lives in [`core`]; the unbounded loop in [`runtime`].

use crate::platform::Registration;

/// Result of registering one path. Failures are logged, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Path added; the backend created or reused a kernel watch.
    Added(Registration),
    /// Path was already in the watch set; nothing was touched.
    Duplicate,
    /// Path added, but its kernel watch could not be created.
    WatchFailed,
    /// Path contains a NUL byte and can never be watched.
    Rejected,
}

/// Counters for one serviced batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub received: usize,
    pub matched: usize,
    pub written: usize,
    /// Events discarded because pipe mode found a backlog.
    pub dropped: usize,
}

pub mod core;
pub mod runtime;

pub use self::core::Watcher;
