//! The message segmenter.
//!
//! Walks a diagnostic message left to right, slicing it at quoted spans.
//! Quoted spans that classify as pure type literals become code segments;
//! everything else stays text, with quoted non-type spans rendered in
//! inline-code backticks.

use crate::classifier::is_pure_type_literal;
use crate::matcher::find_closing_quote;
use memchr::memchr;
use tserr_core::Segment;

/// Split a diagnostic message into an ordered list of segments.
///
/// Concatenating the produced contents reproduces the message in order,
/// modulo the framing markers added around non-type quoted spans and the
/// quotes stripped from extracted spans. The cursor strictly advances every
/// iteration, so the loop always terminates. An empty message produces an
/// empty list.
pub fn segment_message(message: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    if message.is_empty() {
        return segments;
    }

    let bytes = message.as_bytes();
    let mut cursor = 0usize;
    loop {
        let Some(found) = memchr(b'\'', &bytes[cursor..]) else {
            // no quote remains; the rest is one text segment
            if cursor < message.len() {
                segments.push(Segment::text(&message[cursor..]));
            }
            break;
        };
        let open = cursor + found;
        if open > cursor {
            segments.push(Segment::text(&message[cursor..open]));
        }

        let Some(close) = find_closing_quote(message, open + 1) else {
            // unmatched opening quote: degrade the remainder to plain text,
            // quote character included
            segments.push(Segment::text(&message[open..]));
            break;
        };

        let span = &message[open + 1..close];
        if is_pure_type_literal(span) {
            segments.push(Segment::code(span));
        } else {
            segments.push(Segment::text(format!("`{span}`")));
        }
        cursor = close + 1;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use tserr_core::SegmentKind;

    #[test]
    fn test_empty_message() {
        assert!(segment_message("").is_empty());
    }

    #[test]
    fn test_message_without_quotes_is_one_text_segment() {
        let segments = segment_message("Unexpected token.");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Text);
        assert_eq!(segments[0].content, "Unexpected token.");
    }

    #[test]
    fn test_short_quoted_span_becomes_inline_code() {
        let segments = segment_message("Cannot find name 'foo'.");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].content, "Cannot find name ");
        assert_eq!(segments[1].content, "`foo`");
        assert_eq!(segments[1].kind, SegmentKind::Text);
        assert_eq!(segments[2].content, ".");
    }

    #[test]
    fn test_unmatched_quote_degrades_to_text() {
        let segments = segment_message("Expected '{ but the message was cut");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content, "Expected ");
        assert_eq!(segments[1].kind, SegmentKind::Text);
        assert_eq!(segments[1].content, "'{ but the message was cut");
    }

    #[test]
    fn test_message_starting_with_quote_has_no_leading_empty_segment() {
        let segments = segment_message("'foo' is declared but never used.");
        assert_eq!(segments[0].content, "`foo`");
        assert!(segments.iter().all(|s| !s.content.is_empty()));
    }
}
