//! Heuristic classification of quoted spans.
//!
//! Decides whether a quoted span is pure type syntax worth sending to a
//! code formatter, or plain quoted text. The gates are deliberately
//! conservative: a real type mistaken for text costs nothing, while prose
//! handed to the formatter would error or come back mangled.

/// Spans shorter than this are never worth a fenced code block.
const MIN_TYPE_LITERAL_LEN: usize = 30;

/// Classify a quoted span as a pure type literal.
///
/// Three ordered gates, each failing fast:
/// 1. length at least [`MIN_TYPE_LITERAL_LEN`] bytes;
/// 2. the span starts like a type: `{`, `[`, `(`, a capitalized identifier
///    applied to type arguments (`Foo<...`), or an arrow-function head
///    (`value => ...`);
/// 3. the span contains at least one type-shaped pattern: a `: ` type
///    annotation, a brace pair, a union/intersection operator, or `=>`.
pub fn is_pure_type_literal(content: &str) -> bool {
    if content.len() < MIN_TYPE_LITERAL_LEN {
        return false;
    }
    if !has_type_head(content) {
        return false;
    }
    has_type_shape(content)
}

/// Gate 2: does the span open like a type expression?
fn has_type_head(content: &str) -> bool {
    let bytes = content.as_bytes();
    match bytes[0] {
        // object type, tuple type, parenthesized type or parameter list
        b'{' | b'[' | b'(' => true,
        // generic instantiation: Identifier<
        c if c.is_ascii_uppercase() => {
            let rest = ident_end(bytes, 1);
            rest < bytes.len() && bytes[rest] == b'<'
        }
        // arrow head: identifier (optionally spaced) followed by =>
        c if c.is_ascii_lowercase() => {
            let mut pos = ident_end(bytes, 1);
            while pos < bytes.len() && bytes[pos] == b' ' {
                pos += 1;
            }
            bytes[pos..].starts_with(b"=>")
        }
        _ => false,
    }
}

/// Gate 3: does the span contain anything type-shaped?
fn has_type_shape(content: &str) -> bool {
    let bytes = content.as_bytes();
    if has_type_annotation(bytes) {
        return true;
    }
    if let Some(open) = content.find('{') {
        if content[open..].contains('}') {
            return true;
        }
    }
    content.contains('|') || content.contains('&') || content.contains("=>")
}

/// A colon followed by whitespace and a letter, e.g. `a: string`.
fn has_type_annotation(bytes: &[u8]) -> bool {
    bytes
        .windows(3)
        .any(|w| w[0] == b':' && w[1] == b' ' && w[2].is_ascii_alphabetic())
}

/// Advance past identifier characters starting at `pos`.
fn ident_end(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_spans_regardless_of_shape() {
        assert!(!is_pure_type_literal("{ a: string }"));
        assert!(!is_pure_type_literal("Foo<Bar>"));
        assert!(!is_pure_type_literal(""));
    }

    #[test]
    fn test_accepts_object_type_with_annotation() {
        // 40 bytes, starts with `{`, contains `: ` + letter
        let content = "{ a: string; b: number; c: boolean[] } ";
        assert!(content.len() >= 30);
        assert!(is_pure_type_literal(content));
    }

    #[test]
    fn test_rejects_prose_of_sufficient_length() {
        let content = "this overload is deprecated and unsafe";
        assert!(content.len() >= 30);
        assert!(!is_pure_type_literal(content));
    }

    #[test]
    fn test_accepts_generic_instantiation() {
        assert!(is_pure_type_literal("Record<string, { id: number; name: string }>"));
    }

    #[test]
    fn test_accepts_arrow_head() {
        assert!(is_pure_type_literal("value => { readonly kind: string }"));
        assert!(is_pure_type_literal("acc => previous | next | undefined"));
    }

    #[test]
    fn test_accepts_parameter_list_head() {
        assert!(is_pure_type_literal("(state: State, action: Action) => State"));
    }

    #[test]
    fn test_accepts_tuple_with_union() {
        assert!(is_pure_type_literal("[left | right, middle | center, top]"));
    }

    #[test]
    fn test_rejects_prose_starting_lowercase_without_arrow() {
        // long enough and starts lowercase, but no `=>` after the first word
        let content = "awaited operand must be a valid promise";
        assert!(content.len() >= 30);
        assert!(!is_pure_type_literal(content));
    }

    #[test]
    fn test_rejects_capitalized_sentence() {
        // capitalized head without `<` fails the head gate
        let content = "Promise rejection was not handled by anything";
        assert!(content.len() >= 30);
        assert!(!is_pure_type_literal(content));
    }

    #[test]
    fn test_rejects_type_head_without_type_shape() {
        // opens like a tuple but contains nothing type-shaped
        let content = "[one two three four five six seven]";
        assert!(content.len() >= 30);
        assert!(!is_pure_type_literal(content));
    }
}
