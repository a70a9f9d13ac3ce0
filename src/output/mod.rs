// src/output/mod.rs

//! Record output.
//!
//! The emitter writes to an [`OutputSink`] instead of stdout directly, so
//! tests can capture records and script a reader backlog while production
//! uses [`StdoutSink`].

pub mod emitter;
pub mod sink;

pub use emitter::{Emit, Emitter};
pub use sink::{OutputSink, StdoutSink};
