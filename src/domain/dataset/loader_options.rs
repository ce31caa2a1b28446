// ============================================================
// LOADER OPTIONS
// ============================================================
// How input files are read into tables

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for the table loader
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoaderOptions {
    /// CSV field delimiter (default: ',')
    pub delimiter: char,

    /// Guess the delimiter from the first lines instead of using `delimiter`
    pub detect_delimiter: bool,

    /// Encoding label used when a CSV file is not valid UTF-8 (e.g. "windows-1252").
    /// When unset such files are recorded as load failures.
    pub fallback_encoding: Option<String>,

    /// Number of files loaded at once (1 loads sequentially)
    #[validate(range(min = 1, max = 64))]
    pub concurrency: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            detect_delimiter: false,
            fallback_encoding: None,
            concurrency: 1,
        }
    }
}
