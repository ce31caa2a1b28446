use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::Command;
use crate::application::{PipelineOutput, ReportGenerationUseCase, StatisticsPipeline};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::RouterClient;
use crate::infrastructure::report::write_report;

pub async fn execute(command: Command, config: AppConfig) -> Result<()> {
    match command {
        Command::Stats { dir, json } => {
            let directory = resolve_directory(dir, &config)?;
            stats(&directory, json, &config).await
        }
        Command::Report { dir, output_dir } => {
            let directory = resolve_directory(dir, &config)?;
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            report(&directory, &output_dir, &config).await
        }
    }
}

fn resolve_directory(dir: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    dir.or_else(|| config.data_directory.clone()).ok_or_else(|| {
        AppError::ConfigError(
            "No data directory given: pass DIR or set DATA_DIRECTORY".to_string(),
        )
    })
}

async fn stats(directory: &Path, json: bool, config: &AppConfig) -> Result<()> {
    let pipeline = StatisticsPipeline::new(&config.loader)?;
    let output = pipeline.run_concurrent(directory).await?;
    report_skipped(&output);

    if json {
        let rendered = serde_json::to_string_pretty(&output)
            .map_err(|e| AppError::Internal(format!("Failed to serialize statistics: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", output.summary_text);
    }

    Ok(())
}

async fn report(directory: &Path, output_dir: &Path, config: &AppConfig) -> Result<()> {
    let pipeline = StatisticsPipeline::new(&config.loader)?;
    let client = RouterClient::new(Duration::from_secs(config.llm.timeout_secs));
    let use_case = ReportGenerationUseCase::new(pipeline, Arc::new(client));

    let (output, analysis) = use_case.analyze(directory, &config.llm).await?;
    report_skipped(&output);

    let path = write_report(output_dir, &analysis)?;
    println!("{}", path.display());

    Ok(())
}

fn report_skipped(output: &PipelineOutput) {
    if let Some(notice) = skipped_notice(output) {
        eprint!("{}", notice);
    }
}

/// One line per skipped file under an "N file(s) skipped" heading.
fn skipped_notice(output: &PipelineOutput) -> Option<String> {
    if output.failures.is_empty() {
        return None;
    }

    let mut notice = format!("{} file(s) skipped:\n", output.failures.len());
    for failure in &output.failures {
        notice.push_str(&format!("  {}\n", failure));
    }
    Some(notice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_directory_wins_over_config() {
        let config = AppConfig {
            data_directory: Some(PathBuf::from("from-config")),
            ..Default::default()
        };
        let dir = resolve_directory(Some(PathBuf::from("from-cli")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("from-cli"));
    }

    #[test]
    fn test_missing_directory_everywhere() {
        let err = resolve_directory(None, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_skipped_files_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "CVE\nCVE-1\n").unwrap();
        std::fs::write(dir.path().join("b.xlsx"), "not a workbook").unwrap();

        let output = StatisticsPipeline::new(&AppConfig::default().loader)
            .unwrap()
            .run(dir.path())
            .unwrap();
        let notice = skipped_notice(&output).unwrap();

        assert!(notice.starts_with("1 file(s) skipped:\n"));
        assert_eq!(notice.matches("b.xlsx").count(), 1);
        assert_eq!(notice.lines().count(), 2);
    }

    #[test]
    fn test_no_notice_without_skipped_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "CVE\nCVE-1\n").unwrap();

        let output = StatisticsPipeline::new(&AppConfig::default().loader)
            .unwrap()
            .run(dir.path())
            .unwrap();
        assert!(skipped_notice(&output).is_none());
    }

    #[tokio::test]
    async fn test_stats_command_runs_offline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "Severity\nHigh\n").unwrap();

        let command = Command::Stats {
            dir: Some(dir.path().to_path_buf()),
            json: true,
        };
        execute(command, AppConfig::default()).await.unwrap();
    }
}
