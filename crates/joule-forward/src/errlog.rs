// SPDX-License-Identifier: Apache-2.0
// © Joule Contributors <https://github.com/joule-energy/joule>
//! Structured diagnostics collected during a translation run.

/// How bad a diagnostic is.
///
/// Warnings and Errors are always recovered locally: the offending object
/// (or subgraph) is dropped and the run continues. Fatal is the only
/// severity that aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    /// Output is still usable; informational (e.g. a defaulted value was
    /// substituted, or an object type has no translator).
    Warning,
    /// A specific object or subgraph was dropped from the output; the rest
    /// of the run is trustworthy.
    Error,
    /// The run as a whole cannot be trusted.
    Fatal,
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        };
        f.write_str(label)
    }
}

/// One diagnostic raised during translation.
///
/// Entries are created at the failing visitor invocation, appended to the
/// [`ErrorLog`], and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorEntry {
    /// Diagnostic severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Name or short handle of the offending object/record, when known.
    pub related: Option<String>,
}

/// Append-only, chronologically ordered diagnostic sink.
///
/// Ordering matches the order entries were raised during the single-pass
/// driver traversal, which is deterministic for a deterministic model and
/// visitor set. The engine itself never reads entries back; the log is
/// consumed by the caller after the run. Each append is mirrored to a
/// `tracing` event at the matching level.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and mirrors it to `tracing`.
    pub fn log(&mut self, severity: Severity, message: impl Into<String>, related: Option<String>) {
        let entry = ErrorEntry {
            severity,
            message: message.into(),
            related,
        };
        match entry.severity {
            Severity::Warning => {
                tracing::warn!(related = entry.related.as_deref(), "{}", entry.message);
            }
            Severity::Error | Severity::Fatal => {
                tracing::error!(
                    severity = %entry.severity,
                    related = entry.related.as_deref(),
                    "{}",
                    entry.message
                );
            }
        }
        self.entries.push(entry);
    }

    /// Appends a [`Severity::Warning`] entry.
    pub fn warning(&mut self, message: impl Into<String>, related: Option<String>) {
        self.log(Severity::Warning, message, related);
    }

    /// Appends a [`Severity::Error`] entry.
    pub fn error(&mut self, message: impl Into<String>, related: Option<String>) {
        self.log(Severity::Error, message, related);
    }

    /// Appends a [`Severity::Fatal`] entry.
    pub fn fatal(&mut self, message: impl Into<String>, related: Option<String>) {
        self.log(Severity::Fatal, message, related);
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// The highest severity raised so far, if any entry exists.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.entries.iter().map(|entry| entry.severity).max()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
