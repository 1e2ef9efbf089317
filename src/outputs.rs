//! Output sinks for rendered notification lines
//!
//! This module implements the stdout sink used by the binary (plain text or
//! JSON lines) and an in-memory sink that captures lines for inspection.

use crate::config::OutputFormat;
use crate::core::Sink;
use anyhow::Result;
use chrono::Utc;
use serde_json::json;
use std::io::Write;
use std::sync::Mutex;

/// Writes lines to standard output.
pub struct StdoutSink {
    format: OutputFormat,
}

impl StdoutSink {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a line according to the configured output format.
    fn format_line(&self, line: &str) -> Result<String> {
        match self.format {
            OutputFormat::PlainText => Ok(line.to_string()),
            OutputFormat::Json => {
                let record = json!({
                    "timestamp": Utc::now().to_rfc3339(),
                    "line": line,
                });
                Ok(serde_json::to_string(&record)?)
            }
        }
    }
}

impl Sink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let formatted = self.format_line(line)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", formatted)?;
        Ok(())
    }
}

/// Captures every line written to it, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Sink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn write_line(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
        Ok(())
    }
}
