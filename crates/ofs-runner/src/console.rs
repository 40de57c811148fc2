//! # Console Capture
//!
//! Scripts do not print to the process stdout. They log through the
//! `ConsoleBuffer` handle in their execution context, and the harness
//! collects the captured lines into its report afterwards.

use std::sync::{Arc, Mutex};

/// A cheaply clonable sink for captured terminal output.
///
/// All clones share the same underlying buffer, so the handle given to a
/// script and the handle kept by the harness observe the same lines.
#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl ConsoleBuffer {
    /// Fresh empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line of output.
    pub fn log(&self, line: impl Into<String>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.into());
        }
    }

    /// Take all captured lines, leaving the buffer empty.
    pub fn drain(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(_) => Vec::new(),
        }
    }

    /// All captured output joined with newlines, without draining.
    pub fn contents(&self) -> String {
        match self.lines.lock() {
            Ok(lines) => lines.join("\n"),
            Err(_) => String::new(),
        }
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
