//! The external formatter client.
//!
//! An explicit context object owned by the caller: it holds the resolved
//! options, the format cache, the lazily discovered formatter command, and
//! the process runner. All failure modes degrade to "return the original
//! content plus a descriptive error": the diagnostic text the user needs
//! is never discarded, prettifying is a best-effort layer on top.

use crate::cache::FormatCache;
use crate::detect::detect_formatter;
use crate::runner::{FormatterRunner, Invocation, ProcessOutput, ProcessRunner, RunnerError};
use crate::sanitize::{
    restore_ellipsis, sanitize_ellipsis, unwrap_type_alias, wrap_type_expression,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use thiserror::Error;
use tserr_core::Segment;
use tserr_options::ResolvedOptions;

/// Formatting failures, all non-fatal: the outcome still carries the
/// original content.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no formatter executable found; install prettier or set formatterCommand")]
    FormatterNotFound,
    #[error("formatter exited with status {status}: {command}\nstderr: {stderr}\nstdout: {stdout}")]
    ProcessFailed {
        command: String,
        status: i32,
        stderr: String,
        stdout: String,
    },
    #[error("formatter timed out after {0:?}")]
    TimedOut(Duration),
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// The result of one formatting request.
///
/// `content` is always usable: the pretty-printed text on success, the
/// original content on any failure.
#[derive(Debug)]
pub struct FormatOutcome {
    pub content: String,
    pub error: Option<FormatError>,
}

impl FormatOutcome {
    fn formatted(content: String) -> Self {
        Self {
            content,
            error: None,
        }
    }

    fn fallback(original: &str, error: FormatError) -> Self {
        Self {
            content: original.to_string(),
            error: Some(error),
        }
    }

    /// Whether the external formatter actually ran and succeeded.
    pub fn is_formatted(&self) -> bool {
        self.error.is_none()
    }
}

/// One in-flight formatting request.
///
/// The completion flag is checked and set before acting on either the
/// process-exit event or the timeout event, so exactly one outcome wins
/// regardless of arrival order; the losing event is discarded.
#[derive(Debug, Default)]
pub struct FormatJob {
    completed: AtomicBool,
}

impl FormatJob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim completion. Returns `true` for exactly one caller.
    pub fn try_complete(&self) -> bool {
        !self.completed.swap(true, Ordering::AcqRel)
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }
}

/// The formatting context: cache, discovered command, and process runner.
///
/// Constructed once at startup and passed by reference into whatever
/// drives segmentation; `reset` re-arms discovery and empties the cache
/// (used by tests and by configuration reloads).
pub struct FormatterClient {
    options: ResolvedOptions,
    cache: Mutex<FormatCache>,
    runner: Arc<dyn FormatterRunner>,
    invocation: OnceLock<Option<Invocation>>,
    generation: AtomicU64,
}

impl FormatterClient {
    /// Create a client over the real process runner.
    pub fn new(options: ResolvedOptions) -> Self {
        let cache = FormatCache::new(options.cache, options.cache_max_entries);
        Self {
            options,
            cache: Mutex::new(cache),
            runner: Arc::new(ProcessRunner),
            invocation: OnceLock::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a client with a pre-resolved command and a substitute runner.
    ///
    /// `invocation: None` behaves as "no formatter executable available".
    pub fn with_runner(
        options: ResolvedOptions,
        invocation: Option<Invocation>,
        runner: Arc<dyn FormatterRunner>,
    ) -> Self {
        let cache = FormatCache::new(options.cache, options.cache_max_entries);
        let cell = OnceLock::new();
        let _ = cell.set(invocation);
        Self {
            options,
            cache: Mutex::new(cache),
            runner,
            invocation: cell,
            generation: AtomicU64::new(0),
        }
    }

    /// Empty the cache and re-arm formatter discovery.
    pub fn reset(&mut self) {
        self.cache.lock().unwrap().clear();
        self.invocation = OnceLock::new();
    }

    /// The generation currently of interest.
    ///
    /// Callers issuing asynchronous work capture the generation first and
    /// compare it inside the callback: when it changed, a newer diagnostic
    /// is active and the (still delivered) result should be discarded
    /// rather than applied. This is a staleness check, not cancellation;
    /// the external process runs to completion or timeout either way.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Mark that the diagnostic of interest changed.
    pub fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn cache_lookup(&self, content: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap()
            .get(content)
            .map(str::to_string)
    }

    fn resolved_invocation(&self) -> Option<Invocation> {
        self.invocation
            .get_or_init(|| detect_formatter(&self.options))
            .clone()
    }

    /// Pretty-print one extracted type literal.
    ///
    /// Cache lookup first; on a miss the sanitized, alias-wrapped content
    /// goes to the external process under the configured timeout.
    pub async fn format(&self, content: &str) -> FormatOutcome {
        if let Some(hit) = self.cache_lookup(content) {
            return FormatOutcome::formatted(hit);
        }
        self.format_uncached(content).await
    }

    async fn format_uncached(&self, content: &str) -> FormatOutcome {
        let Some(invocation) = self.resolved_invocation() else {
            tracing::debug!("no formatter executable found, delivering original content");
            return FormatOutcome::fallback(content, FormatError::FormatterNotFound);
        };

        let wrapped = wrap_type_expression(&sanitize_ellipsis(content));
        let timeout = self.options.timeout;
        let job = FormatJob::new();

        // select drops the losing branch, which kills the process on the
        // timeout path; the job flag arbitrates should both events ever
        // materialize from a runner with its own completion semantics.
        tokio::select! {
            result = self.runner.run(&invocation, &wrapped) => {
                if job.try_complete() {
                    self.accept(content, &invocation, result)
                } else {
                    FormatOutcome::fallback(content, FormatError::TimedOut(timeout))
                }
            }
            _ = tokio::time::sleep(timeout) => {
                if job.try_complete() {
                    tracing::warn!(?timeout, command = %invocation.command, "formatter timed out");
                }
                FormatOutcome::fallback(content, FormatError::TimedOut(timeout))
            }
        }
    }

    /// Pretty-print one extracted type literal, blocking the caller.
    ///
    /// Never fails: any error is logged and the original content comes
    /// back unchanged. The blocking path carries no explicit deadline of
    /// its own; it is bounded only by the process itself.
    pub fn format_sync(&self, content: &str) -> String {
        if let Some(hit) = self.cache_lookup(content) {
            return hit;
        }
        let Some(invocation) = self.resolved_invocation() else {
            tracing::debug!("no formatter executable found, delivering original content");
            return content.to_string();
        };
        let wrapped = wrap_type_expression(&sanitize_ellipsis(content));
        let result = self.runner.run_blocking(&invocation, &wrapped);
        self.accept(content, &invocation, result).content
    }

    /// Pretty-print asynchronously; `callback` is invoked exactly once,
    /// on the runtime's scheduler.
    ///
    /// A cache hit is still delivered a scheduler tick later so callers
    /// finish wiring up whatever consumes the result.
    pub fn format_async(
        self: &Arc<Self>,
        content: &str,
        callback: impl FnOnce(FormatOutcome) + Send + 'static,
    ) {
        let client = Arc::clone(self);
        let content = content.to_string();
        tokio::spawn(async move {
            if let Some(hit) = client.cache_lookup(&content) {
                tokio::task::yield_now().await;
                callback(FormatOutcome::formatted(hit));
                return;
            }
            callback(client.format_uncached(&content).await);
        });
    }

    /// Format every code segment of one message in place.
    ///
    /// One independent job per code segment; jobs race freely and each
    /// updates only its own slot by index, so final content is correct
    /// regardless of completion order. Failed jobs re-deliver the original
    /// content and never abort their siblings. Returns how many segments
    /// were actually formatted.
    pub async fn format_segments(self: &Arc<Self>, segments: &mut [Segment]) -> usize {
        let mut handles = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            if !segment.is_code() {
                continue;
            }
            let client = Arc::clone(self);
            let content = segment.content.clone();
            handles.push(tokio::spawn(async move {
                (index, client.format(&content).await)
            }));
        }

        let mut formatted = 0;
        for handle in handles {
            let Ok((index, outcome)) = handle.await else {
                continue;
            };
            if outcome.is_formatted() {
                formatted += 1;
            }
            segments[index].content = outcome.content;
        }
        formatted
    }

    /// Fold a finished process into an outcome, caching on success.
    fn accept(
        &self,
        content: &str,
        invocation: &Invocation,
        result: Result<ProcessOutput, RunnerError>,
    ) -> FormatOutcome {
        match result {
            Ok(output) if output.is_success() => {
                let formatted = restore_ellipsis(&unwrap_type_alias(&output.stdout));
                self.cache.lock().unwrap().set(content, formatted.clone());
                FormatOutcome::formatted(formatted)
            }
            Ok(output) => {
                tracing::warn!(
                    status = output.status,
                    command = %invocation.command,
                    "formatter process failed"
                );
                FormatOutcome::fallback(
                    content,
                    FormatError::ProcessFailed {
                        command: invocation.display(),
                        status: output.status,
                        stderr: output.stderr,
                        stdout: output.stdout,
                    },
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "formatter could not run");
                FormatOutcome::fallback(content, FormatError::Runner(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_completes_exactly_once() {
        let job = FormatJob::new();
        assert!(!job.is_completed());
        assert!(job.try_complete());
        assert!(!job.try_complete());
        assert!(job.is_completed());
    }

    #[test]
    fn test_generation_is_monotonic() {
        let client = FormatterClient::with_runner(
            ResolvedOptions::default(),
            None,
            Arc::new(ProcessRunner),
        );
        assert_eq!(client.generation(), 0);
        assert_eq!(client.bump_generation(), 1);
        assert_eq!(client.bump_generation(), 2);
        assert_eq!(client.generation(), 2);
    }
}
