//! tserr_core: Core types for the tserr diagnostic prettifier.
//!
//! Provides the segment value model produced by the message segmenter and
//! the diagnostic record shape consumed from the editor/LSP side.

pub mod diagnostic;
pub mod segment;

// Re-export commonly used types
pub use diagnostic::{DiagnosticRecord, DiagnosticSeverity};
pub use segment::{Segment, SegmentKind, CODE_LANG};
