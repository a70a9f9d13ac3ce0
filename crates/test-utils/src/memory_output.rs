use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Write};

use pathwatch::output::OutputSink;

/// Captures records in memory and replays a scripted reader backlog.
///
/// Each backlog check pops the next scripted value; once the script is
/// exhausted the reader is considered caught up (0 unread bytes).
#[derive(Debug, Default)]
pub struct MemoryOutput {
    written: Vec<u8>,
    backlog: RefCell<VecDeque<usize>>,
    backlog_checks: Cell<usize>,
    flushes: usize,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the unread byte count reported by the next backlog check.
    pub fn push_backlog(&mut self, pending: usize) {
        self.backlog.get_mut().push_back(pending);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.written
    }

    /// Written records split on `delimiter`, delimiter removed.
    pub fn records(&self, delimiter: u8) -> Vec<String> {
        self.written
            .split(|&b| b == delimiter)
            .filter(|r| !r.is_empty())
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records(b'\n')
    }

    pub fn backlog_checks(&self) -> usize {
        self.backlog_checks.get()
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

impl OutputSink for MemoryOutput {
    fn pending_bytes(&self) -> io::Result<usize> {
        self.backlog_checks.set(self.backlog_checks.get() + 1);
        Ok(self.backlog.borrow_mut().pop_front().unwrap_or(0))
    }
}
