//! Segment types for sliced diagnostic messages.
//!
//! A diagnostic message is split into an ordered sequence of segments:
//! plain text spans and code spans that are worth pretty-printing. Order is
//! significant and is preserved through classification, caching, formatting,
//! and rendering.

use std::fmt;

/// Language tag attached to every code segment.
pub const CODE_LANG: &str = "typescript";

/// The kind of a message segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Plain message text, rendered as-is.
    Text,
    /// A type literal extracted from a quoted span, rendered as a code block.
    Code,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Text => write!(f, "text"),
            SegmentKind::Code => write!(f, "code"),
        }
    }
}

/// A typed, ordered span of a diagnostic message.
///
/// Segments are value objects. The one permitted in-place mutation is
/// replacing a code segment's `content` with its formatted counterpart;
/// kind and position never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Whether this span is plain text or formattable code.
    pub kind: SegmentKind,
    /// The span's content, quotes excluded for extracted spans.
    pub content: String,
    /// Language tag; always set for code segments.
    pub lang: Option<String>,
}

impl Segment {
    /// Create a text segment.
    #[inline]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Text,
            content: content.into(),
            lang: None,
        }
    }

    /// Create a code segment carrying the fixed language tag.
    #[inline]
    pub fn code(content: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Code,
            content: content.into(),
            lang: Some(CODE_LANG.to_string()),
        }
    }

    /// Whether this segment is a code segment.
    #[inline]
    pub fn is_code(&self) -> bool {
        self.kind == SegmentKind::Code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_segment_carries_lang() {
        let seg = Segment::code("{ a: string }");
        assert!(seg.is_code());
        assert_eq!(seg.lang.as_deref(), Some(CODE_LANG));
    }

    #[test]
    fn test_text_segment_has_no_lang() {
        let seg = Segment::text("is not assignable to");
        assert!(!seg.is_code());
        assert!(seg.lang.is_none());
    }
}
