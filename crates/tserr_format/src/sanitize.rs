//! Content sanitization and wrapping for the external formatter.
//!
//! Two pre-processing steps make a bare type expression digestible for a
//! code formatter: truncation ellipses that TypeScript inserts into long
//! type displays are replaced with a placeholder identifier the parser
//! accepts, and the expression is embedded as the right-hand side of a
//! synthetic type alias so it parses as a first-class declaration.

/// Placeholder standing in for a diagnostic truncation ellipsis.
pub const ELLIPSIS_PLACEHOLDER: &str = "__ELLIPSIS__";

/// Name of the synthetic alias the fragment is wrapped in.
pub const ALIAS_NAME: &str = "__Pretty";

/// Replace diagnostic ellipsis markers with the placeholder.
///
/// Covers both the bare `...` marker and its `...;` member-position
/// variant; the trailing punctuation is left in place, so restoration is a
/// single exact reverse replacement.
pub fn sanitize_ellipsis(content: &str) -> String {
    content.replace("...", ELLIPSIS_PLACEHOLDER)
}

/// Undo [`sanitize_ellipsis`] on formatter output.
pub fn restore_ellipsis(content: &str) -> String {
    content.replace(ELLIPSIS_PLACEHOLDER, "...")
}

/// Embed a sanitized type expression in a synthetic type-alias declaration.
pub fn wrap_type_expression(content: &str) -> String {
    format!("type {ALIAS_NAME} = {content}")
}

/// Strip the synthetic declaration back off pretty-printed output.
///
/// Formatter output ends with a statement terminator and a newline; both
/// are removed along with the alias prefix. When the formatter chose to
/// break the line directly after `=`, the prefix match falls back to
/// slicing after the first `=`.
pub fn unwrap_type_alias(output: &str) -> String {
    let trimmed = output.trim_end();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    let prefix = format!("type {ALIAS_NAME} = ");
    if let Some(rest) = trimmed.strip_prefix(&prefix) {
        return rest.to_string();
    }
    match trimmed.find('=') {
        Some(pos) => trimmed[pos + 1..].trim_start().to_string(),
        None => trimmed.to_string(),
    }
}
