//! tserr_format: The formatting pipeline for extracted type literals.
//!
//! Takes the code segments the segmenter produced, deduplicates them
//! through a content-addressed cache, and dispatches cache misses to an
//! external pretty-printing process, synchronously or asynchronously, with
//! timeout enforcement and fallback to the original content on every
//! failure path.

pub mod cache;
pub mod client;
pub mod detect;
pub mod runner;
pub mod sanitize;

pub use cache::FormatCache;
pub use client::{FormatError, FormatJob, FormatOutcome, FormatterClient};
pub use runner::{FormatterRunner, Invocation, ProcessOutput, ProcessRunner, RunnerError};
