//! Text sources: where the already-extracted document text comes from.

use std::io::Read;
use std::path::PathBuf;

use tracing::debug;

use toponymy_shared::{Result, ToponymyError};

/// Supplies one contiguous block of document text per run.
pub trait TextSource {
    /// Human-readable origin, used in logs and the JSON report.
    fn describe(&self) -> String;

    /// Read the full text. Unreadable or non-UTF-8 input is an error.
    fn read_text(&self) -> Result<String>;
}

/// UTF-8 text file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_text(&self) -> Result<String> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| ToponymyError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = text.len(), "read source text");
        Ok(text)
    }
}

/// Standard input, read to the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl TextSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".into()
    }

    fn read_text(&self) -> Result<String> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| ToponymyError::io("<stdin>", e))?;
        debug!(bytes = text.len(), "read source text from stdin");
        Ok(text)
    }
}

/// Resolve a CLI input argument: `-` is stdin, anything else a file path.
pub fn source_for(input: &str) -> Box<dyn TextSource> {
    if input == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(input))
    }
}
