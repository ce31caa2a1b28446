use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::dataset::LoadFailure;

/// Everything the report renderer needs from one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub statistics_text: String,
    pub generated_text: String,
    pub timestamp: DateTime<Local>,
    pub skipped_files: Vec<LoadFailure>,
}
