// src/platform/mod.rs

//! Kernel notification backends.
//!
//! Two notification models sit behind the same pair of traits:
//!
//! - [`Granularity::Directory`] (inotify): one watch per directory, events
//!   name a child relative to that directory and must be post-filtered.
//! - [`Granularity::File`] (kqueue): one watch per exact path, events carry
//!   the registered path back verbatim.
//!
//! The engine only sees [`WatchRegistry`] and [`EventSource`]; the native
//! backend for the build target is exported as [`NativeBackend`].

use std::io;

use crate::errors::Result;
use crate::watch::path_utils::WatchPath;

#[cfg(target_os = "linux")]
pub mod inotify;

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub mod kqueue;

#[cfg(target_os = "linux")]
pub use self::inotify::InotifyBackend as NativeBackend;

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
pub use self::kqueue::KqueueBackend as NativeBackend;

#[cfg(not(any(
    target_os = "linux",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "dragonfly"
)))]
compile_error!("pathwatch needs inotify (Linux) or kqueue (macOS/BSD)");

/// What one kernel watch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One handle per directory; events name a child of it.
    Directory,
    /// One handle per exact path; events echo that path.
    File,
}

/// Outcome of [`WatchRegistry::ensure_watch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A new kernel handle was created.
    Created,
    /// The target was already covered by a live handle.
    Existing,
    /// The kernel folded the target into a handle first registered under a
    /// different spelling. Events are reported relative to that spelling.
    Aliased(WatchPath),
}

/// Where a raw event points once the registry has decoded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// Child `name` of the watched directory `container`. An empty name
    /// means the directory itself.
    Child { container: WatchPath, name: Vec<u8> },
    /// The exact registered path.
    Path(WatchPath),
}

/// A raw event resolved back to the path it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub subject: Subject,
    pub is_delete: bool,
}

/// Blocking source of raw kernel events.
pub trait EventSource {
    type Event;

    /// Block until the kernel has a non-empty batch.
    ///
    /// Invalidation notices are consumed here and never returned. Any error,
    /// and any end-of-stream, is fatal to the caller.
    fn next_batch(&mut self) -> Result<Vec<Self::Event>>;
}

/// Creates kernel watches and maps raw events back to paths.
pub trait WatchRegistry: EventSource {
    fn granularity(&self) -> Granularity;

    /// Make sure `target` has a live kernel watch. Handles are never removed
    /// by the caller; a second call for the same target must not create a
    /// second handle.
    fn ensure_watch(&mut self, target: &WatchPath, want_delete: bool) -> io::Result<Registration>;

    /// Decode `event`, or `None` if its handle is unknown.
    fn resolve(&self, event: &Self::Event) -> Option<Resolved>;

    /// Number of live kernel handles.
    fn watch_count(&self) -> usize;
}
