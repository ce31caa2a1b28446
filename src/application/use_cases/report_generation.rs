use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::application::use_cases::prompts::{build_prompt, SYSTEM_PROMPT};
use crate::application::use_cases::statistics_pipeline::{PipelineOutput, StatisticsPipeline};
use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use crate::domain::report::AnalysisResult;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_generated_text;

/// Runs the statistics pipeline and asks the generation backend to interpret it
pub struct ReportGenerationUseCase {
    pipeline: StatisticsPipeline,
    llm_client: Arc<dyn LLMClient>,
}

impl ReportGenerationUseCase {
    pub fn new(pipeline: StatisticsPipeline, llm_client: Arc<dyn LLMClient>) -> Self {
        Self {
            pipeline,
            llm_client,
        }
    }

    pub async fn analyze(
        &self,
        directory: &Path,
        config: &LLMConfig,
    ) -> Result<(PipelineOutput, AnalysisResult)> {
        let output = self.pipeline.run_concurrent(directory).await?;
        let prompt = build_prompt(&output.summary_text);

        info!(provider = ?config.provider, model = %config.model, "Requesting analysis");
        let raw = self.llm_client.generate(config, SYSTEM_PROMPT, &prompt).await?;

        let analysis = AnalysisResult {
            statistics_text: output.summary_text.clone(),
            generated_text: clean_generated_text(&raw),
            timestamp: Local::now(),
            skipped_files: output.failures.clone(),
        };

        Ok((output, analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::LoaderOptions;
    use crate::domain::error::AppError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LLMClient for RecordingClient {
        async fn generate(&self, _config: &LLMConfig, _system: &str, user: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(user.to_string());
            Ok("<think>draft</think>Prioritise CVE-1 on all hosts.".to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl LLMClient for FailingClient {
        async fn generate(&self, _config: &LLMConfig, _system: &str, _user: &str) -> Result<String> {
            Err(AppError::LLMError("API error (503): overloaded".to_string()))
        }
    }

    fn pipeline() -> StatisticsPipeline {
        StatisticsPipeline::new(&LoaderOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_prompt_contains_statistics_and_output_is_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "CVE\nCVE-1\nCVE-1\n").unwrap();
        std::fs::write(dir.path().join("b.xls"), "garbage").unwrap();

        let client = Arc::new(RecordingClient::default());
        let use_case = ReportGenerationUseCase::new(pipeline(), client.clone());

        let (output, analysis) = use_case
            .analyze(dir.path(), &LLMConfig::default())
            .await
            .unwrap();

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(output.summary_text.trim_end()));
        assert_eq!(analysis.generated_text, "Prioritise CVE-1 on all hosts.");
        assert_eq!(analysis.statistics_text, output.summary_text);
        assert_eq!(analysis.skipped_files.len(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.csv"), "CVE\nCVE-1\n").unwrap();

        let use_case = ReportGenerationUseCase::new(pipeline(), Arc::new(FailingClient));
        let err = use_case
            .analyze(dir.path(), &LLMConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LLMError(_)));
    }

    #[tokio::test]
    async fn test_no_generation_call_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(RecordingClient::default());
        let use_case = ReportGenerationUseCase::new(pipeline(), client.clone());

        let err = use_case
            .analyze(dir.path(), &LLMConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyDataset));
        assert!(client.prompts.lock().unwrap().is_empty());
    }
}
