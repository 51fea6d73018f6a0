//! Pretty JSON on standard output

use super::{Writer, WriterError, to_pretty_json};
use crate::defaults::DEFAULT_INDENT;
use std::io::Write as _;

/// Writes the document to stdout followed by a newline
#[derive(Debug, Clone)]
pub struct StdoutWriter {
    indent: String,
}

impl StdoutWriter {
    pub fn new() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
        }
    }

    /// Use a custom indent string (default: tab)
    pub fn indentation(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Render the document as it would be printed
    pub fn render(&self, document: &serde_json::Value) -> Result<Vec<u8>, WriterError> {
        let mut bytes = to_pretty_json(document, &self.indent)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for StdoutWriter {
    fn write(&self, document: &serde_json::Value) -> Result<(), WriterError> {
        let bytes = self.render(document)?;
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&bytes)
            .and_then(|()| stdout.flush())
            .map_err(|e| WriterError::io("<stdout>", e))
    }
}
