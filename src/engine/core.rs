// src/engine/core.rs

use std::fmt;
use std::fs;

use tracing::{debug, warn};

use crate::errors::{PathwatchError, Result};
use crate::output::{Emit, Emitter, OutputSink};
use crate::platform::{Registration, WatchRegistry};
use crate::types::WatchOptions;
use crate::watch::matcher::match_event;
use crate::watch::path_utils::WatchPath;
use crate::watch::set::{WatchSet, watch_target};

use super::{AddOutcome, BatchReport};

/// All mutable state of a running watcher.
///
/// Owns the watch set, the platform backend and the emitter. Constructed once
/// and driven from a single thread.
pub struct Watcher<R: WatchRegistry, O: OutputSink> {
    options: WatchOptions,
    set: WatchSet,
    registry: R,
    emitter: Emitter<O>,
}

impl<R, O> fmt::Debug for Watcher<R, O>
where
    R: WatchRegistry + fmt::Debug,
    O: OutputSink + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("options", &self.options)
            .field("set", &self.set)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<R: WatchRegistry, O: OutputSink> Watcher<R, O> {
    pub fn new(registry: R, sink: O, options: WatchOptions) -> Self {
        Self {
            emitter: Emitter::new(sink, &options),
            options,
            set: WatchSet::new(),
            registry,
        }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    pub fn watch_set(&self) -> &WatchSet {
        &self.set
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn sink(&self) -> &O {
        self.emitter.sink()
    }

    pub fn sink_mut(&mut self) -> &mut O {
        self.emitter.sink_mut()
    }

    /// Add `path` to the watch set and make sure the kernel reports it.
    ///
    /// A path that cannot be `lstat`ed is assumed to be a regular file. Watch
    /// creation failures are logged with the path and reason; they never
    /// stop registration of other paths.
    pub fn register(&mut self, path: WatchPath) -> AddOutcome {
        if path.contains_nul() {
            warn!(path = %path, "path contains a NUL byte; not watching it");
            return AddOutcome::Rejected;
        }
        if self.set.contains(&path) {
            debug!(path = %path, "already registered");
            return AddOutcome::Duplicate;
        }

        let is_dir = fs::symlink_metadata(path.as_path())
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        let target = watch_target(&path, is_dir, self.registry.granularity());

        let outcome = match self.registry.ensure_watch(&target, self.options.want_delete) {
            Ok(Registration::Aliased(first)) => {
                warn!(
                    path = %path,
                    target = %target,
                    watched_as = %first,
                    "directory already watched under another name; its changes are reported under that name"
                );
                AddOutcome::Added(Registration::Aliased(first))
            }
            Ok(registration) => {
                debug!(path = %path, target = %target, ?registration, "watch registered");
                AddOutcome::Added(registration)
            }
            Err(source) => {
                let err = PathwatchError::Watch {
                    path: target.to_string(),
                    source,
                };
                warn!(path = %path, "cannot watch {err}");
                AddOutcome::WatchFailed
            }
        };

        self.set.insert(path);
        outcome
    }

    /// Block for one batch of kernel events and emit every match.
    ///
    /// In pipe mode a backlog on the output drops the rest of the batch;
    /// the next batch is processed normally.
    pub fn service_batch(&mut self) -> Result<BatchReport> {
        let batch = self.registry.next_batch()?;
        let mut report = BatchReport {
            received: batch.len(),
            ..BatchReport::default()
        };

        for (idx, event) in batch.iter().enumerate() {
            let Some(resolved) = self.registry.resolve(event) else {
                continue;
            };
            let Some(change) = match_event(&self.set, &resolved) else {
                continue;
            };
            report.matched += 1;

            match self.emitter.emit(&change)? {
                Emit::Written => report.written += 1,
                Emit::Backlogged(pending) => {
                    report.dropped = batch.len() - idx;
                    debug!(pending, dropped = report.dropped, "output backlog; dropping rest of batch");
                    break;
                }
            }
        }

        Ok(report)
    }
}
