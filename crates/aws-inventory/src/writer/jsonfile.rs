//! JSON file output
//!
//! Writes the whole document to `<dir>/<file>`, or in per-item mode one
//! `<dir>/<id>.json` per element of a top-level array.

use super::{Writer, WriterError, to_pretty_json};
use crate::defaults::{DEFAULT_INDENT, DEFAULT_OUTPUT_FILE};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Writes the document as pretty JSON under an output directory
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    dir: PathBuf,
    output_file: String,
    indent: String,
    per_item: bool,
}

impl JsonFileWriter {
    /// Create a writer targeting `dir` with the default file name and indent
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            indent: DEFAULT_INDENT.to_string(),
            per_item: false,
        }
    }

    /// Set the output file name.
    ///
    /// The name must stay inside the output directory: relative, non-empty
    /// and without `..` components.
    pub fn output_file(mut self, name: impl Into<String>) -> Result<Self, WriterError> {
        let name = name.into();
        if !is_local(&name) {
            return Err(WriterError::NonLocalFileName(name));
        }
        self.output_file = name;
        Ok(self)
    }

    /// Use a custom indent string (default: tab)
    pub fn indentation(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Write each element of a top-level array to its own file
    pub fn per_item(mut self, per_item: bool) -> Self {
        self.per_item = per_item;
        self
    }

    /// Path of the single-document output file
    pub fn target(&self) -> PathBuf {
        self.dir.join(&self.output_file)
    }

    fn write_file(&self, path: &Path, value: &Value) -> Result<(), WriterError> {
        let bytes = to_pretty_json(value, &self.indent)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WriterError::io(parent, e))?;
        }
        std::fs::write(path, bytes).map_err(|e| WriterError::io(path, e))?;
        debug!(path = %path.display(), "Wrote JSON file");
        Ok(())
    }

    fn write_items(&self, items: &[Value]) -> Result<(), WriterError> {
        let mut used = HashSet::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let base = item
                .get("id")
                .and_then(Value::as_str)
                .map(sanitize_file_stem)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| index.to_string());
            let stem = unique_stem(&mut used, base);
            self.write_file(&self.dir.join(format!("{stem}.json")), item)?;
        }
        Ok(())
    }
}

impl Writer for JsonFileWriter {
    fn write(&self, document: &Value) -> Result<(), WriterError> {
        match document {
            Value::Array(items) if self.per_item => self.write_items(items),
            _ => self.write_file(&self.target(), document),
        }
    }
}

/// Whether `name` is a non-empty relative path that stays below its base
fn is_local(name: &str) -> bool {
    let path = Path::new(name);
    let mut has_normal = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_normal
}

/// Claim `base`, or the first free `base-N` (N from 2) if it is taken
fn unique_stem(used: &mut HashSet<String>, base: String) -> String {
    if used.insert(base.clone()) {
        return base;
    }
    let mut suffix = 2usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Replace characters that are awkward in file names
fn sanitize_file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}
