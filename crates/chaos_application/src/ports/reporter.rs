//! Sink for the informational lines emitted by delay injection

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

/// Receives human-readable injection reports
///
/// Delay injection emits exactly two line formats:
/// - `Injecting {delay} of delay with a rate of {rate}`
/// - `Added {elapsed:.2}ms to {handler}`
pub trait InjectionReporter: Send + Sync + fmt::Debug {
    /// Emit one line
    fn report(&self, line: &str);
}

/// Writes reports to standard output, one per line
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl StdoutReporter {
    /// Create a new stdout reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InjectionReporter for StdoutReporter {
    fn report(&self, line: &str) {
        info!(target: "chaos::report", "{line}");

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}") {
            warn!(error = %e, "Failed to write injection report to stdout");
        }
    }
}

/// Collects reports in memory
///
/// Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reported lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// All reported lines joined by newlines
    pub fn output(&self) -> String {
        self.lines.lock().join("\n")
    }

    /// Check whether nothing was reported
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drop all collected lines
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl InjectionReporter for MemoryReporter {
    fn report(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
