// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod input;
pub mod logging;
pub mod output;
pub mod platform;
pub mod types;
pub mod watch;

use std::convert::Infallible;
use std::ffi::OsStr;
use std::io::{self, BufRead};
use std::os::unix::ffi::OsStrExt;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::engine::Watcher;
use crate::errors::{PathwatchError, Result};
use crate::input::PathRecords;
use crate::output::{OutputSink, StdoutSink};
use crate::platform::{NativeBackend, WatchRegistry};
use crate::watch::WatchPath;

/// Positional argument that stands for "read a path list from stdin".
pub const STDIN_MARKER: &[u8] = b"-";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the native kernel backend
/// - registration of every path from the arguments and stdin
/// - the unbounded event loop writing records to stdout
///
/// It only returns on a fatal error.
pub fn run(args: CliArgs) -> Result<Infallible> {
    let options = args.watch_options();
    info!(?options, "starting");

    let backend = NativeBackend::open()?;
    let mut watcher = Watcher::new(backend, StdoutSink::new(), options);

    register_paths(&mut watcher, args.paths.as_slice(), || io::stdin().lock())?;

    watcher.run()
}

/// Register positional paths left to right.
///
/// Each `-` drains a path list from `open_stdin()` before carrying on with
/// the remaining arguments. No arguments at all means one stdin list.
pub fn register_paths<R, O, S, B>(
    watcher: &mut Watcher<R, O>,
    args: &[impl AsRef<OsStr>],
    mut open_stdin: S,
) -> Result<()>
where
    R: WatchRegistry,
    O: OutputSink,
    S: FnMut() -> B,
    B: BufRead,
{
    if args.is_empty() {
        return register_from_reader(watcher, open_stdin()).map(drop);
    }

    for arg in args {
        let arg = arg.as_ref();
        if arg.as_bytes() == STDIN_MARKER {
            register_from_reader(watcher, open_stdin())?;
        } else {
            watcher.register(WatchPath::from(arg));
        }
    }
    Ok(())
}

/// Register every record of a path list; returns how many were read.
pub fn register_from_reader<R, O, B>(watcher: &mut Watcher<R, O>, reader: B) -> Result<usize>
where
    R: WatchRegistry,
    O: OutputSink,
    B: BufRead,
{
    let delimiter = watcher.options().delimiter;
    let mut count = 0;
    for record in PathRecords::new(reader, delimiter) {
        let path = record.map_err(PathwatchError::Input)?;
        watcher.register(path);
        count += 1;
    }
    debug!(count, %delimiter, "path list read");
    Ok(count)
}
