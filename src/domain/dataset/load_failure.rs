use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A file that could not be loaded. Recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

impl LoadFailure {
    pub fn new(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            error: error.into(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}
