//! Explicit diagnostic sink threaded through the collection and
//! reporting layers.
//!
//! Recoverable conditions (narrowed listing output, unparseable size
//! fields, per-resource update failures) are reported through a
//! [`DiagnosticSink`] passed in at construction rather than an ambient
//! process-wide logger, so failure paths can be asserted on in tests
//! without capturing global output.

use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    Info,
    Warning,
    Error,
}

/// Receives diagnostics from collectors and the reporter.
pub trait DiagnosticSink: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// The production sink: forwards each message to the matching
/// `tracing` macro under the `zfsmon` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "zfsmon", "{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(target: "zfsmon", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "zfsmon", "{message}");
    }
}

/// Buffers diagnostics in memory. Used by tests to assert on the
/// recoverable-failure paths.
///
/// # Examples
///
/// ```
/// use zfsmon_common::diag::{DiagLevel, DiagnosticSink, MemorySink};
///
/// let sink = MemorySink::default();
/// sink.warning("ratio -> \"1.76x\" is not a size");
/// assert_eq!(sink.messages(DiagLevel::Warning).len(), 1);
/// assert!(sink.messages(DiagLevel::Error).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(DiagLevel, String)>>,
}

impl MemorySink {
    /// All recorded messages in emission order.
    pub fn records(&self) -> Vec<(DiagLevel, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Messages recorded at `level`, in emission order.
    pub fn messages(&self, level: DiagLevel) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: DiagLevel, message: &str) {
        self.records
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(DiagLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.push(DiagLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.push(DiagLevel::Error, message);
    }
}
