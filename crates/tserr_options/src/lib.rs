//! tserr_options: Configuration for the diagnostic prettifier.
//!
//! Parses a `tserr.json` configuration file and provides the options
//! structure consumed by the formatting pipeline. Every field is optional
//! in the file; `resolve` fills in defaults. Resolved options are held by
//! value and treated as immutable for the duration of a single operation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default maximum number of cached formatting results.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Default print width passed to the external formatter.
pub const DEFAULT_PRINT_WIDTH: u32 = 80;

/// Default timeout for one asynchronous formatting job, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Prettifier options, matching the tserr.json schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Whether formatting results are cached.
    pub cache: Option<bool>,
    /// Maximum cache entry count before the cache is cleared.
    pub cache_max_entries: Option<usize>,
    /// Explicit formatter executable, overriding discovery.
    pub formatter_command: Option<String>,
    /// Print width requested from the formatter.
    pub print_width: Option<u32>,
    /// Asynchronous formatting timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Prefer the blocking formatting path over the asynchronous one.
    pub prefer_sync: Option<bool>,
}

impl FormatterOptions {
    /// Fill in defaults, producing the options the pipeline runs with.
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            cache: self.cache.unwrap_or(true),
            cache_max_entries: self.cache_max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            formatter_command: self.formatter_command.clone(),
            print_width: self.print_width.unwrap_or(DEFAULT_PRINT_WIDTH),
            timeout: Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
            prefer_sync: self.prefer_sync.unwrap_or(false),
        }
    }
}

/// Options with defaults applied.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub cache: bool,
    pub cache_max_entries: usize,
    pub formatter_command: Option<String>,
    pub print_width: u32,
    pub timeout: Duration,
    pub prefer_sync: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        FormatterOptions::default().resolve()
    }
}

/// Parse a tserr.json configuration from a string.
pub fn parse_options(content: &str) -> Result<FormatterOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a tserr.json configuration from a path.
pub fn parse_options_file(path: &str) -> Result<FormatterOptions, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let options = parse_options(&content)?;
    Ok(options)
}
