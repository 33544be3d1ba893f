//! File-based data source.
//!
//! Reads a JSON export of the database from disk. Useful for replaying a
//! snapshot offline or for feeding the dashboard from another tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use luxwatch_adapters::{interpret_body, AdapterError, FetchOutcome};

use super::DataSource;

/// A data source that re-reads a JSON file on every poll.
///
/// The file holds the same document the database would return for the
/// sensor path (e.g. an export downloaded from the Firebase console).
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn fetch(&mut self) -> FetchOutcome {
        match fs::read_to_string(&self.path) {
            Ok(content) => interpret_body(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => FetchOutcome::Failure(
                AdapterError::Connection(format!("Read error: {}: {}", self.path.display(), e)),
            ),
            Err(e) => FetchOutcome::Failure(AdapterError::Unknown(format!("Read error: {}", e))),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
