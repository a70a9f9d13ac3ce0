// src/watch/mod.rs

//! Which paths are watched and which events concern them.
//!
//! This module is responsible for:
//! - the exact-string watch set,
//! - deriving the kernel watch target for a path,
//! - rebuilding a candidate path from a decoded event and matching it.
//!
//! It does **not** talk to the kernel; see [`crate::platform`].

pub mod matcher;
pub mod path_utils;
pub mod set;

pub use matcher::{Change, candidate_path, match_event};
pub use path_utils::{WatchPath, dirname, join_child};
pub use set::{WatchSet, watch_target};
