// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

/// Exit status when the kernel notification interface cannot be created.
pub const EXIT_INIT_FAILURE: i32 = 111;

/// Exit status for fatal I/O once the process is running.
pub const EXIT_FATAL_IO: i32 = 1;

#[derive(Error, Debug)]
pub enum PathwatchError {
    #[error("{backend} init: {source}")]
    Init {
        backend: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading {backend} events: {source}")]
    EventRead {
        backend: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} event stream ended")]
    EventStreamClosed(&'static str),

    #[error("{path}: {source}")]
    Watch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading path list: {0}")]
    Input(#[source] std::io::Error),

    #[error("error writing event record: {0}")]
    Output(#[source] std::io::Error),
}

impl PathwatchError {
    /// Process exit status for this error when it reaches `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            PathwatchError::Init { .. } => EXIT_INIT_FAILURE,
            _ => EXIT_FATAL_IO,
        }
    }
}

pub type Result<T> = std::result::Result<T, PathwatchError>;
