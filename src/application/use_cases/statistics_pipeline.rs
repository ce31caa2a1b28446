// ============================================================
// STATISTICS PIPELINE
// ============================================================
// discover -> load -> merge -> aggregate -> format

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::application::use_cases::aggregator::aggregate;
use crate::application::use_cases::merger::merge_tables;
use crate::application::use_cases::summary_formatter::format_summary;
use crate::application::use_cases::table_loader::{LoadOutcome, TableLoader};
use crate::domain::dataset::{LoadFailure, LoaderOptions};
use crate::domain::error::Result;
use crate::domain::statistics::StatisticsReport;
use crate::infrastructure::discovery::FileDiscoverer;

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub statistics: StatisticsReport,
    #[serde(skip)]
    pub summary_text: String,
    pub failures: Vec<LoadFailure>,
    pub files_discovered: usize,
    pub tables_loaded: usize,
}

pub struct StatisticsPipeline {
    loader: TableLoader,
    concurrency: usize,
}

impl StatisticsPipeline {
    pub fn new(options: &LoaderOptions) -> Result<Self> {
        Ok(Self {
            loader: TableLoader::new(options)?,
            concurrency: options.concurrency.max(1),
        })
    }

    /// Run synchronously over every supported file in `directory`.
    pub fn run(&self, directory: &Path) -> Result<PipelineOutput> {
        let discoverer = FileDiscoverer::new(directory)?;
        let files: Vec<_> = discoverer.iter()?.collect();
        let files_discovered = files.len();

        info!(directory = %directory.display(), files = files_discovered, "Loading files");
        let outcome = self.loader.load_all(files);

        Self::finish(directory, files_discovered, outcome)
    }

    /// Same as `run`, loading files concurrently when configured to.
    pub async fn run_concurrent(&self, directory: &Path) -> Result<PipelineOutput> {
        if self.concurrency <= 1 {
            return self.run(directory);
        }

        let discoverer = FileDiscoverer::new(directory)?;
        let files: Vec<_> = discoverer.iter()?.collect();
        let files_discovered = files.len();

        info!(
            directory = %directory.display(),
            files = files_discovered,
            concurrency = self.concurrency,
            "Loading files"
        );
        let outcome = self.loader.load_all_concurrent(files, self.concurrency).await;

        Self::finish(directory, files_discovered, outcome)
    }

    fn finish(directory: &Path, files_discovered: usize, outcome: LoadOutcome) -> Result<PipelineOutput> {
        let LoadOutcome { tables, failures } = outcome;
        let tables_loaded = tables.len();

        let dataset = merge_tables(tables)?;
        let statistics = aggregate(&dataset);
        let summary_text = format_summary(&statistics);

        info!(
            directory = %directory.display(),
            rows = statistics.total_rows,
            tables = tables_loaded,
            skipped = failures.len(),
            "Statistics computed"
        );

        Ok(PipelineOutput {
            statistics,
            summary_text,
            failures,
            files_discovered,
            tables_loaded,
        })
    }
}
