use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

pub const REPORT_FILE_PREFIX: &str = "cybersecurity_summary_";

/// Create the report output directory if needed.
pub fn ensure_output_dir(output_dir: &Path) -> std::io::Result<PathBuf> {
    ensure_dir(output_dir)?;
    Ok(output_dir.to_path_buf())
}

/// `cybersecurity_summary_YYYYmmdd_HHMMSS.md` inside `output_dir`
pub fn report_path(output_dir: &Path, timestamp: &DateTime<Local>) -> PathBuf {
    output_dir.join(format!(
        "{}{}.md",
        REPORT_FILE_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
