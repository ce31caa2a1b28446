// ============================================================
// TABLE LOADER USE CASE
// ============================================================
// Parse discovered files into tables, isolating per-file failures

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::dataset::{LoadFailure, LoaderOptions, SourceFile, SourceKind, Table};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::spreadsheet::WorkbookParser;

/// Tables that loaded, in discovery order, plus the files that did not
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tables: Vec<Table>,
    pub failures: Vec<LoadFailure>,
}

impl LoadOutcome {
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Table::row_count).sum()
    }

    fn record(&mut self, path: PathBuf, result: Result<Vec<Table>>) {
        match result {
            Ok(tables) => {
                debug!(path = %path.display(), tables = tables.len(), "Loaded file");
                self.tables.extend(tables);
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Recorded load failure");
                self.failures.push(LoadFailure::new(path, err.to_string()));
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableLoader {
    csv: CsvParser,
    workbook: WorkbookParser,
}

impl TableLoader {
    pub fn new(options: &LoaderOptions) -> Result<Self> {
        Ok(Self {
            csv: CsvParser::from_options(options)?,
            workbook: WorkbookParser::new(),
        })
    }

    /// One table for a CSV file, one per sheet for a spreadsheet.
    pub fn load(&self, file: &SourceFile) -> Result<Vec<Table>> {
        match file.kind {
            SourceKind::Csv => Ok(vec![self.csv.parse_file(&file.path)?]),
            SourceKind::Spreadsheet => self.workbook.parse_file(&file.path),
            SourceKind::Unsupported => Err(AppError::ValidationError(format!(
                "Unsupported file type: {}",
                file.path.display()
            ))),
        }
    }

    /// Load files one after another. Never fails; bad files become `LoadFailure`s.
    pub fn load_all<I>(&self, files: I) -> LoadOutcome
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut outcome = LoadOutcome::default();
        for file in files {
            let result = self.load(&file);
            outcome.record(file.path, result);
        }
        outcome
    }

    /// Load up to `concurrency` files at once on blocking worker threads.
    ///
    /// Results are put back into input order before they are recorded, so
    /// the outcome is identical to `load_all` over the same files.
    pub async fn load_all_concurrent(&self, files: Vec<SourceFile>, concurrency: usize) -> LoadOutcome {
        let limit = Arc::new(Semaphore::new(concurrency.max(1)));
        let paths: Vec<PathBuf> = files.iter().map(|file| file.path.clone()).collect();
        let mut tasks = JoinSet::new();

        for (position, file) in files.into_iter().enumerate() {
            let loader = *self;
            let limit = Arc::clone(&limit);
            tasks.spawn(async move {
                let _permit = limit.acquire_owned().await;
                let result = tokio::task::spawn_blocking(move || loader.load(&file))
                    .await
                    .unwrap_or_else(|e| Err(AppError::Internal(format!("Load task failed: {}", e))));
                (position, result)
            });
        }

        let mut slots: Vec<Option<Result<Vec<Table>>>> = paths.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, result)) => slots[position] = Some(result),
                Err(e) => warn!(error = %e, "Load task aborted"),
            }
        }

        let mut outcome = LoadOutcome::default();
        for (path, slot) in paths.into_iter().zip(slots) {
            let result = slot.unwrap_or_else(|| {
                Err(AppError::Internal("Load task aborted before finishing".to_string()))
            });
            outcome.record(path, result);
        }
        outcome
    }
}
