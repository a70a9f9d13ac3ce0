use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;

use pathwatch::errors::{PathwatchError, Result};
use pathwatch::platform::{
    EventSource, Granularity, Registration, Resolved, Subject, WatchRegistry,
};
use pathwatch::watch::WatchPath;

/// A scripted kernel event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    /// Child `name` changed, reported by the watch on directory `dir`.
    Child {
        dir: WatchPath,
        name: Vec<u8>,
        delete: bool,
    },
    /// The watch on exactly `path` fired.
    File { path: WatchPath, delete: bool },
    /// The kernel dropped the watch on `target`.
    Invalidated { target: WatchPath },
}

impl FakeEvent {
    pub fn child(dir: &str, name: &str) -> Self {
        FakeEvent::Child {
            dir: dir.into(),
            name: name.as_bytes().to_vec(),
            delete: false,
        }
    }

    pub fn child_deleted(dir: &str, name: &str) -> Self {
        FakeEvent::Child {
            dir: dir.into(),
            name: name.as_bytes().to_vec(),
            delete: true,
        }
    }

    pub fn file(path: &str) -> Self {
        FakeEvent::File {
            path: path.into(),
            delete: false,
        }
    }

    pub fn file_deleted(path: &str) -> Self {
        FakeEvent::File {
            path: path.into(),
            delete: true,
        }
    }

    pub fn invalidated(target: &str) -> Self {
        FakeEvent::Invalidated {
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FakeHandle {
    want_delete: bool,
}

/// In-memory backend behaving like either kernel model.
///
/// - `ensure_watch` creates one handle per distinct target and records
///   every call. Targets scripted with [`FakeRegistry::alias`] reuse the
///   handle of their first spelling.
/// - Deletion events only resolve on handles armed for deletions, as the
///   kernel would not deliver them otherwise.
/// - `next_batch` replays scripted batches; once they run out it reports a
///   closed event stream. Invalidated handles still resolve for the rest of
///   their own batch and are forgotten on the next read.
#[derive(Debug)]
pub struct FakeRegistry {
    granularity: Granularity,
    handles: BTreeMap<WatchPath, FakeHandle>,
    failing: BTreeSet<WatchPath>,
    batches: VecDeque<Vec<FakeEvent>>,
    retired: Vec<WatchPath>,
    aliases: BTreeMap<WatchPath, WatchPath>,
    ensure_calls: Vec<WatchPath>,
}

impl FakeRegistry {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            handles: BTreeMap::new(),
            failing: BTreeSet::new(),
            batches: VecDeque::new(),
            retired: Vec::new(),
            aliases: BTreeMap::new(),
            ensure_calls: Vec::new(),
        }
    }

    /// Make `ensure_watch` fail with permission denied for `target`.
    pub fn fail_target(&mut self, target: &str) {
        self.failing.insert(target.into());
    }

    /// Make `target` resolve to the live handle of `first`, the way inotify
    /// folds two spellings of one directory into a single descriptor.
    pub fn alias(&mut self, target: &str, first: &str) {
        self.aliases.insert(target.into(), first.into());
    }

    pub fn push_batch(&mut self, batch: Vec<FakeEvent>) {
        self.batches.push_back(batch);
    }

    pub fn ensure_calls(&self) -> &[WatchPath] {
        &self.ensure_calls
    }

    pub fn has_watch(&self, target: &str) -> bool {
        self.handles.contains_key(&WatchPath::from(target))
    }

    pub fn watched_targets(&self) -> Vec<String> {
        self.handles.keys().map(|p| p.to_string()).collect()
    }

    fn live_handle(&self, target: &WatchPath, delete: bool) -> Option<FakeHandle> {
        let handle = *self.handles.get(target)?;
        if delete && !handle.want_delete {
            return None;
        }
        Some(handle)
    }
}

impl EventSource for FakeRegistry {
    type Event = FakeEvent;

    fn next_batch(&mut self) -> Result<Vec<FakeEvent>> {
        while let Some(batch) = self.batches.pop_front() {
            for target in self.retired.drain(..) {
                self.handles.remove(&target);
            }

            let mut live = Vec::with_capacity(batch.len());
            for event in batch {
                match event {
                    FakeEvent::Invalidated { target } => self.retired.push(target),
                    other => live.push(other),
                }
            }
            if !live.is_empty() {
                return Ok(live);
            }
        }
        Err(PathwatchError::EventStreamClosed("fake"))
    }
}

impl WatchRegistry for FakeRegistry {
    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn ensure_watch(&mut self, target: &WatchPath, want_delete: bool) -> io::Result<Registration> {
        self.ensure_calls.push(target.clone());

        if self.failing.contains(target) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        if self.handles.contains_key(target) {
            return Ok(Registration::Existing);
        }
        if let Some(first) = self.aliases.get(target) {
            if self.handles.contains_key(first) {
                return Ok(Registration::Aliased(first.clone()));
            }
        }
        self.handles.insert(target.clone(), FakeHandle { want_delete });
        Ok(Registration::Created)
    }

    fn resolve(&self, event: &FakeEvent) -> Option<Resolved> {
        match event {
            FakeEvent::Child { dir, name, delete } => {
                self.live_handle(dir, *delete)?;
                Some(Resolved {
                    subject: Subject::Child {
                        container: dir.clone(),
                        name: name.clone(),
                    },
                    is_delete: *delete,
                })
            }
            FakeEvent::File { path, delete } => {
                self.live_handle(path, *delete)?;
                Some(Resolved {
                    subject: Subject::Path(path.clone()),
                    is_delete: *delete,
                })
            }
            FakeEvent::Invalidated { .. } => None,
        }
    }

    fn watch_count(&self) -> usize {
        self.handles.len()
    }
}
