// src/engine/runtime.rs

use std::convert::Infallible;

use tracing::{debug, info};

use crate::errors::Result;
use crate::output::OutputSink;
use crate::platform::WatchRegistry;

use super::core::Watcher;

impl<R: WatchRegistry, O: OutputSink> Watcher<R, O> {
    /// Service kernel events forever.
    ///
    /// Consumes the watcher, so no path can be registered once this starts.
    /// Only returns on a fatal error.
    pub fn run(mut self) -> Result<Infallible> {
        info!(
            paths = self.watch_set().len(),
            watches = self.registry().watch_count(),
            "watching"
        );

        loop {
            let report = self.service_batch()?;
            debug!(?report, "batch done");
        }
    }
}
