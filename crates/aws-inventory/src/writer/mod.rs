//! Output rendering for the inventory document
//!
//! Two sinks exist: pretty JSON on stdout and JSON files under an output
//! directory. Both take an already-built `serde_json::Value`.

pub mod jsonfile;
pub mod stdout;

pub use jsonfile::JsonFileWriter;
pub use stdout::StdoutWriter;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Output writer errors
#[derive(Debug, Error)]
pub enum WriterError {
    /// The output file name escapes the output directory
    #[error("unable to create the JSON file writer: the file is not a relative filename {0}")]
    NonLocalFileName(String),

    /// The document could not be rendered
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing to the destination failed
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriterError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WriterError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A destination for the inventory document
pub trait Writer {
    fn write(&self, document: &serde_json::Value) -> Result<(), WriterError>;
}

/// Output destinations selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    File,
    #[default]
    Stdout,
}

impl OutputKind {
    /// Every output, in canonical order
    pub const ALL: [OutputKind; 2] = [OutputKind::File, OutputKind::Stdout];

    /// Name used on the command line
    pub fn arg_name(self) -> &'static str {
        match self {
            OutputKind::File => "file",
            OutputKind::Stdout => "stdout",
        }
    }

    /// Parse a sanitized command-line name
    pub fn from_arg(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.arg_name() == name)
    }
}

/// Render `document` as pretty JSON with a custom indent string
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(
    document: &T,
    indent: &str,
) -> Result<Vec<u8>, WriterError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    Ok(buf)
}
