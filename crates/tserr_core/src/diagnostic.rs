//! Diagnostic records as supplied by the editor/LSP layer.
//!
//! Only `message` is consumed by the segmentation core; severity, source,
//! and code are metadata for the rendering side.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity, matching the categories TypeScript reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Suggestion => write!(f, "suggestion"),
            DiagnosticSeverity::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic as handed over by the collaborating editor/LSP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// The raw message text to be segmented and prettified.
    pub message: String,
    /// Severity, when the producer supplied one.
    #[serde(default)]
    pub severity: Option<DiagnosticSeverity>,
    /// Producer name, e.g. "typescript" or "ts".
    #[serde(default)]
    pub source: Option<String>,
    /// The numeric diagnostic code, e.g. 2322.
    #[serde(default)]
    pub code: Option<u32>,
}

impl DiagnosticRecord {
    /// Create a record carrying only a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: None,
            source: None,
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(DiagnosticSeverity::Error.to_string(), "error");
        assert_eq!(DiagnosticSeverity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_from_message() {
        let rec = DiagnosticRecord::from_message("Unexpected token.");
        assert_eq!(rec.message, "Unexpected token.");
        assert!(rec.severity.is_none());
        assert!(rec.code.is_none());
    }
}
