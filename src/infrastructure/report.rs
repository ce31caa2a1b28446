// ============================================================
// MARKDOWN REPORT
// ============================================================
// Render an analysis result and write it to a timestamped file

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::error::Result;
use crate::domain::report::AnalysisResult;
use crate::infrastructure::storage::{ensure_output_dir, report_path};

pub fn render_markdown(analysis: &AnalysisResult) -> String {
    let mut report = String::new();

    let _ = writeln!(report, "# Cybersecurity Vulnerability Report");
    let _ = writeln!(
        report,
        "Generated on: {}\n",
        analysis.timestamp.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(report, "## Key Statistics\n```");
    let _ = writeln!(report, "{}", analysis.statistics_text.trim_end());
    let _ = writeln!(report, "```\n");
    let _ = writeln!(report, "## AI-Generated Insights");
    let _ = writeln!(report, "{}", analysis.generated_text.trim_end());

    if !analysis.skipped_files.is_empty() {
        let _ = writeln!(report, "\n## Skipped Files");
        for failure in &analysis.skipped_files {
            let _ = writeln!(
                report,
                "- `{}`: {}",
                failure.path.display(),
                failure.error
            );
        }
    }

    report
}

/// Write the rendered report into `output_dir` and return its path.
pub fn write_report(output_dir: &Path, analysis: &AnalysisResult) -> Result<PathBuf> {
    let output_dir = ensure_output_dir(output_dir)?;
    let path = report_path(&output_dir, &analysis.timestamp);

    std::fs::write(&path, render_markdown(analysis))?;
    info!(path = %path.display(), "Report written");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::LoadFailure;
    use chrono::{Local, TimeZone};

    fn analysis(skipped_files: Vec<LoadFailure>) -> AnalysisResult {
        AnalysisResult {
            statistics_text: "Total vulnerabilities recorded: 3\n".to_string(),
            generated_text: "Patch the edge devices first.".to_string(),
            timestamp: Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
            skipped_files,
        }
    }

    #[test]
    fn test_render_markdown_layout() {
        let report = render_markdown(&analysis(Vec::new()));

        assert!(report.starts_with("# Cybersecurity Vulnerability Report\n"));
        assert!(report.contains("Generated on: 2026-10-19 08:30:00"));
        assert!(report.contains("## Key Statistics\n```\nTotal vulnerabilities recorded: 3\n```"));
        assert!(report.contains("## AI-Generated Insights\nPatch the edge devices first."));
        assert!(!report.contains("Skipped Files"));
    }

    #[test]
    fn test_render_lists_skipped_files() {
        let report = render_markdown(&analysis(vec![LoadFailure::new(
            "broken.xlsx".into(),
            "Failed to open workbook",
        )]));
        assert!(report.contains("## Skipped Files\n- `broken.xlsx`: Failed to open workbook"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&dir.path().join("out"), &analysis(Vec::new())).unwrap();

        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("cybersecurity_summary_20261019_083000.md")
        );
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("## AI-Generated Insights"));
    }
}
