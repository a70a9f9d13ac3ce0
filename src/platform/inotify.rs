// src/platform/inotify.rs

//! Directory-granularity backend built on Linux inotify.
//!
//! inotify reports `(watch descriptor, child name)` pairs, never full paths,
//! so the backend keeps a reverse map from descriptor to the directory string
//! it was registered with.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io;
use std::os::unix::ffi::OsStrExt;

use inotify::{EventMask, Inotify, WatchDescriptor, WatchMask};
use tracing::{debug, warn};

use crate::errors::{PathwatchError, Result};
use crate::platform::{EventSource, Granularity, Registration, Resolved, Subject, WatchRegistry};
use crate::watch::path_utils::WatchPath;

const BACKEND: &str = "inotify";
const BUFFER_SIZE: usize = 8192;

/// One decoded inotify record, detached from the read buffer.
#[derive(Debug, Clone)]
pub struct InotifyEvent {
    pub wd: WatchDescriptor,
    pub mask: EventMask,
    pub name: Vec<u8>,
}

#[derive(Debug)]
pub struct InotifyBackend {
    inotify: Inotify,
    dirs: BTreeMap<WatchDescriptor, WatchPath>,
    /// Invalidated descriptors, forgotten once their batch has been resolved.
    retired: Vec<WatchDescriptor>,
    buffer: Vec<u8>,
}

impl InotifyBackend {
    pub fn open() -> Result<Self> {
        let inotify = Inotify::init().map_err(|source| PathwatchError::Init {
            backend: BACKEND,
            source,
        })?;

        Ok(Self {
            inotify,
            dirs: BTreeMap::new(),
            retired: Vec::new(),
            buffer: vec![0; BUFFER_SIZE],
        })
    }

    fn watch_mask(want_delete: bool) -> WatchMask {
        let mut mask = WatchMask::MOVED_TO | WatchMask::CLOSE_WRITE;
        if want_delete {
            mask |= WatchMask::DELETE | WatchMask::DELETE_SELF;
        }
        mask
    }
}

impl EventSource for InotifyBackend {
    type Event = InotifyEvent;

    fn next_batch(&mut self) -> Result<Vec<InotifyEvent>> {
        loop {
            for wd in self.retired.drain(..) {
                if let Some(dir) = self.dirs.remove(&wd) {
                    debug!(%dir, "watch invalidated by kernel");
                }
            }

            let events = self
                .inotify
                .read_events_blocking(&mut self.buffer)
                .map_err(|source| PathwatchError::EventRead {
                    backend: BACKEND,
                    source,
                })?;

            let mut seen = 0usize;
            let mut batch = Vec::new();
            for event in events {
                seen += 1;

                if event.mask.contains(EventMask::IGNORED) {
                    self.retired.push(event.wd);
                    continue;
                }
                if event.mask.contains(EventMask::Q_OVERFLOW) {
                    warn!("inotify queue overflowed; events were lost");
                    continue;
                }

                batch.push(InotifyEvent {
                    wd: event.wd,
                    mask: event.mask,
                    name: event.name.map(|n| n.as_bytes().to_vec()).unwrap_or_default(),
                });
            }

            if seen == 0 {
                return Err(PathwatchError::EventStreamClosed(BACKEND));
            }
            if !batch.is_empty() {
                return Ok(batch);
            }
        }
    }
}

impl WatchRegistry for InotifyBackend {
    fn granularity(&self) -> Granularity {
        Granularity::Directory
    }

    fn ensure_watch(&mut self, target: &WatchPath, want_delete: bool) -> io::Result<Registration> {
        let wd = self
            .inotify
            .watches()
            .add(target.as_path(), Self::watch_mask(want_delete))?;

        // The kernel hands back the existing descriptor for a directory it
        // already watches; the first directory string stays authoritative.
        match self.dirs.entry(wd) {
            Entry::Vacant(slot) => {
                slot.insert(target.clone());
                Ok(Registration::Created)
            }
            Entry::Occupied(slot) if slot.get() == target => Ok(Registration::Existing),
            Entry::Occupied(slot) => Ok(Registration::Aliased(slot.get().clone())),
        }
    }

    fn resolve(&self, event: &InotifyEvent) -> Option<Resolved> {
        let container = self.dirs.get(&event.wd)?;
        Some(Resolved {
            subject: Subject::Child {
                container: container.clone(),
                name: event.name.clone(),
            },
            is_delete: event.mask.intersects(EventMask::DELETE | EventMask::DELETE_SELF),
        })
    }

    fn watch_count(&self) -> usize {
        self.dirs.len()
    }
}
