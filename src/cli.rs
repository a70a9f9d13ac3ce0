// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Usage errors exit with status 2 (clap's default).

use std::ffi::OsString;

use clap::{Parser, ValueEnum};

use crate::types::{Delimiter, WatchOptions};

/// Command-line arguments for `pathwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pathwatch",
    version,
    about = "Print a line whenever one of the given paths changes.",
    long_about = None
)]
pub struct CliArgs {
    /// Use NUL instead of newline to separate input paths and output records.
    #[arg(short = '0')]
    pub null_delimited: bool,

    /// Also report deletions, prefixed with "- ".
    #[arg(short = 'd')]
    pub deletions: bool,

    /// Pipe mode: skip events while stdout still holds unread records.
    #[arg(short = 'p')]
    pub pipe_mode: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PATHWATCH_LOG` or `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Paths to watch, in order. `-` reads a path list from stdin; with no
    /// paths at all the list is read from stdin.
    #[arg(value_name = "PATH")]
    pub paths: Vec<OsString>,
}

impl CliArgs {
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            delimiter: if self.null_delimited {
                Delimiter::Nul
            } else {
                Delimiter::Newline
            },
            want_delete: self.deletions,
            pipe_mode: self.pipe_mode,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
