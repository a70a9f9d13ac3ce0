#![allow(dead_code)]

use pathwatch::engine::Watcher;
use pathwatch::platform::Granularity;
use pathwatch::types::{Delimiter, WatchOptions};
use pathwatch::watch::WatchPath;

use crate::fake_registry::{FakeEvent, FakeRegistry};
use crate::memory_output::MemoryOutput;

/// Builder for a `Watcher` over the in-memory fakes.
pub struct WatcherBuilder {
    options: WatchOptions,
    registry: FakeRegistry,
    output: MemoryOutput,
    paths: Vec<WatchPath>,
}

impl WatcherBuilder {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            options: WatchOptions::default(),
            registry: FakeRegistry::new(granularity),
            output: MemoryOutput::new(),
            paths: Vec::new(),
        }
    }

    pub fn directory() -> Self {
        Self::new(Granularity::Directory)
    }

    pub fn file() -> Self {
        Self::new(Granularity::File)
    }

    pub fn nul_delimited(mut self) -> Self {
        self.options.delimiter = Delimiter::Nul;
        self
    }

    pub fn deletions(mut self) -> Self {
        self.options.want_delete = true;
        self
    }

    pub fn pipe_mode(mut self) -> Self {
        self.options.pipe_mode = true;
        self
    }

    pub fn watch(mut self, path: impl Into<WatchPath>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn fail_target(mut self, target: &str) -> Self {
        self.registry.fail_target(target);
        self
    }

    pub fn alias(mut self, target: &str, first: &str) -> Self {
        self.registry.alias(target, first);
        self
    }

    pub fn batch(mut self, events: Vec<FakeEvent>) -> Self {
        self.registry.push_batch(events);
        self
    }

    pub fn backlog(mut self, pending: usize) -> Self {
        self.output.push_backlog(pending);
        self
    }

    /// Build the watcher and register every path given to [`Self::watch`].
    pub fn build(self) -> Watcher<FakeRegistry, MemoryOutput> {
        let mut watcher = Watcher::new(self.registry, self.output, self.options);
        for path in self.paths {
            watcher.register(path);
        }
        watcher
    }
}
