//! tserr_render: Markdown rendering for segmented diagnostics.
//!
//! Turns a segment sequence into display lines: text segments flow as
//! markdown prose, code segments become fenced blocks tagged with their
//! language. Consumes the segmenter's output after formatting has merged
//! results back in; purely presentational.

use tserr_core::{DiagnosticRecord, Segment, SegmentKind};

/// Render a segment sequence as markdown.
///
/// Code fences are placed on their own lines; surrounding text keeps its
/// original spacing otherwise. Segment order is preserved exactly.
pub fn render_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Text => out.push_str(&segment.content),
            SegmentKind::Code => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                let lang = segment.lang.as_deref().unwrap_or_default();
                out.push_str(&format!("```{}\n{}\n```\n", lang, segment.content));
            }
        }
    }
    out
}

/// Render a full diagnostic: a severity header line, then the segmented
/// message body.
pub fn render_diagnostic(record: &DiagnosticRecord, segments: &[Segment]) -> String {
    let mut out = String::new();
    out.push_str(&header(record));
    out.push('\n');
    out.push_str(&render_segments(segments));
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// The header line, e.g. `error TS2322 (typescript):`.
fn header(record: &DiagnosticRecord) -> String {
    let mut line = String::new();
    match record.severity {
        Some(severity) => line.push_str(&severity.to_string()),
        None => line.push_str("diagnostic"),
    }
    if let Some(code) = record.code {
        line.push_str(&format!(" TS{code}"));
    }
    if let Some(source) = &record.source {
        line.push_str(&format!(" ({source})"));
    }
    line.push(':');
    line
}
