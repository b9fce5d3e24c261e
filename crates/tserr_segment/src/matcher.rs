//! Nesting-aware closing-quote matching.
//!
//! Type strings inside TypeScript diagnostics routinely contain unescaped
//! structural characters (`{ a: 'x' }`, `Map<string, 'a' | 'b'>`), so the
//! closing quote of a quoted span is the first quote at which every
//! delimiter class has returned to zero depth, not simply the next quote.

/// Find the closing single quote for a span whose opening quote sits just
/// before `start`.
///
/// Scans forward from byte offset `start`, tracking independent nesting
/// depths for `{}`, `[]`, `()`, and `<>`. A quote closes the span only when
/// all four depths read exactly zero. Depths may transiently go negative on
/// malformed input; that is tolerated, not corrected, and the delimiter
/// classes are never cross-validated against each other.
///
/// Returns the byte index of the closing quote, or `None` when the text
/// ends first. All significant characters are ASCII, so byte offsets are
/// always character boundaries.
pub fn find_closing_quote(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut braces = 0i32;
    let mut brackets = 0i32;
    let mut parens = 0i32;
    let mut angles = 0i32;

    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => braces += 1,
            b'}' => braces -= 1,
            b'[' => brackets += 1,
            b']' => brackets -= 1,
            b'(' => parens += 1,
            b')' => parens -= 1,
            b'<' => angles += 1,
            b'>' => angles -= 1,
            b'\'' => {
                if braces == 0 && brackets == 0 && parens == 0 && angles == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_span() {
        // 'Foo' -> closing quote right after the identifier
        assert_eq!(find_closing_quote("'Foo'", 1), Some(4));
    }

    #[test]
    fn test_skips_quote_inside_braces() {
        let text = "'{ a: 'x' }'";
        // quotes at depth 1 are not candidates; the match is the final quote
        assert_eq!(find_closing_quote(text, 1), Some(11));
    }

    #[test]
    fn test_skips_quote_inside_generics() {
        let text = "'Record<'a' | 'b', string>'";
        assert_eq!(find_closing_quote(text, 1), Some(26));
    }

    #[test]
    fn test_unmatched_open_quote() {
        assert_eq!(find_closing_quote("'{ a: string }", 1), None);
    }

    #[test]
    fn test_unbalanced_delimiters_never_settle() {
        // the stray `{` keeps brace depth at 1 through the final quote
        assert_eq!(find_closing_quote("'{ a: string'", 1), None);
    }

    #[test]
    fn test_negative_depth_is_tolerated() {
        // `}` before `{` dips below zero and comes back; the quote after
        // re-balancing still closes
        assert_eq!(find_closing_quote("'} {'", 1), Some(4));
    }

    #[test]
    fn test_mismatched_classes_are_independent() {
        // an unmatched `<` does not affect the brace counter, but it does
        // keep the angle counter non-zero
        assert_eq!(find_closing_quote("'Array<number'", 1), None);
    }

    #[test]
    fn test_empty_tail() {
        assert_eq!(find_closing_quote("'", 1), None);
        assert_eq!(find_closing_quote("''", 1), Some(1));
    }
}
