// src/platform/kqueue.rs

//! File-granularity backend built on kqueue `EVFILT_VNODE` filters.
//!
//! Every registered path is opened read-only and non-blocking, and its
//! descriptor is handed to a [`kqueue::Watcher`]. The kernel reports the
//! descriptor back as [`Ident::Fd`] on every event; the backend keeps the
//! exact path each descriptor was opened for.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::os::fd::{AsRawFd, IntoRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;

use kqueue::{EventData, EventFilter, FilterFlag, Ident, Vnode};
use tracing::{debug, trace};

use crate::errors::{PathwatchError, Result};
use crate::platform::{EventSource, Granularity, Registration, Resolved, Subject, WatchRegistry};
use crate::watch::path_utils::WatchPath;

const BACKEND: &str = "kqueue";
const MAX_BATCH: usize = 16;

/// One vnode notification on a watched descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KqueueEvent {
    pub fd: RawFd,
    pub is_delete: bool,
}

impl KqueueEvent {
    /// Turn one kernel event into a change on a watched descriptor.
    ///
    /// `EV_ERROR` entries are fatal; events that are not vnode changes on a
    /// descriptor yield `None`.
    pub fn decode(event: kqueue::Event) -> Result<Option<Self>> {
        match event {
            kqueue::Event {
                data: EventData::Error(source),
                ..
            } => Err(PathwatchError::EventRead {
                backend: BACKEND,
                source,
            }),
            kqueue::Event {
                data: EventData::Vnode(vnode),
                ident: Ident::Fd(fd),
            } => Ok(Some(KqueueEvent {
                fd,
                is_delete: matches!(vnode, Vnode::Delete),
            })),
            other => {
                trace!(event = ?other, "ignoring non-vnode kqueue event");
                Ok(None)
            }
        }
    }
}

pub struct KqueueBackend {
    kqueue: kqueue::Watcher,
    handles: BTreeMap<WatchPath, RawFd>,
    subjects: BTreeMap<RawFd, WatchPath>,
}

impl fmt::Debug for KqueueBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KqueueBackend")
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}

impl KqueueBackend {
    pub fn open() -> Result<Self> {
        let kqueue = kqueue::Watcher::new().map_err(|source| PathwatchError::Init {
            backend: BACKEND,
            source,
        })?;

        Ok(Self {
            kqueue,
            handles: BTreeMap::new(),
            subjects: BTreeMap::new(),
        })
    }

    fn filter_flags(want_delete: bool) -> FilterFlag {
        let mut flags = FilterFlag::NOTE_WRITE | FilterFlag::NOTE_ATTRIB | FilterFlag::NOTE_RENAME;
        if want_delete {
            flags |= FilterFlag::NOTE_DELETE;
        }
        flags
    }
}

impl EventSource for KqueueBackend {
    type Event = KqueueEvent;

    fn next_batch(&mut self) -> Result<Vec<KqueueEvent>> {
        loop {
            let Some(first) = self.kqueue.poll_forever(None) else {
                return Err(PathwatchError::EventStreamClosed(BACKEND));
            };

            let mut batch = Vec::new();
            batch.extend(KqueueEvent::decode(first)?);
            while batch.len() < MAX_BATCH {
                let Some(next) = self.kqueue.poll(None) else {
                    break;
                };
                batch.extend(KqueueEvent::decode(next)?);
            }

            if !batch.is_empty() {
                return Ok(batch);
            }
        }
    }
}

impl WatchRegistry for KqueueBackend {
    fn granularity(&self) -> Granularity {
        Granularity::File
    }

    fn ensure_watch(&mut self, target: &WatchPath, want_delete: bool) -> io::Result<Registration> {
        if self.handles.contains_key(target) {
            return Ok(Registration::Existing);
        }

        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(target.as_path())?;
        let fd = file.as_raw_fd();

        self.kqueue
            .add_fd(fd, EventFilter::EVFILT_VNODE, Self::filter_flags(want_delete))?;
        if let Err(err) = self.kqueue.watch() {
            let _ = self.kqueue.remove_fd(fd, EventFilter::EVFILT_VNODE);
            return Err(err);
        }

        // The watcher owns the descriptor from here on and closes it on drop.
        let fd = file.into_raw_fd();
        debug!(path = %target, fd, "kqueue vnode filter added");
        self.handles.insert(target.clone(), fd);
        self.subjects.insert(fd, target.clone());
        Ok(Registration::Created)
    }

    fn resolve(&self, event: &KqueueEvent) -> Option<Resolved> {
        let path = self.subjects.get(&event.fd)?;
        Some(Resolved {
            subject: Subject::Path(path.clone()),
            is_delete: event.is_delete,
        })
    }

    fn watch_count(&self) -> usize {
        self.handles.len()
    }
}
