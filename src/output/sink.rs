// src/output/sink.rs

use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};

/// Destination for event records.
pub trait OutputSink: Write {
    /// Bytes written but not yet consumed by the reader on the other end.
    fn pending_bytes(&self) -> io::Result<usize>;
}

/// Unbuffered stdout; callers flush after every record.
#[derive(Debug)]
pub struct StdoutSink {
    stdout: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for StdoutSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.stdout.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl OutputSink for StdoutSink {
    fn pending_bytes(&self) -> io::Result<usize> {
        unread_bytes(self.stdout.as_raw_fd())
    }
}

/// `FIONREAD` on `fd`: how much the reader has not picked up yet.
pub fn unread_bytes(fd: RawFd) -> io::Result<usize> {
    let mut n: libc::c_int = 0;
    let rc = unsafe { libc::ioctl(fd, libc::FIONREAD as _, &mut n as *mut libc::c_int) };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(usize::try_from(n).unwrap_or(0))
}
