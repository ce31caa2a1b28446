pub mod use_cases;

pub use use_cases::aggregator::{aggregate, rank_values};
pub use use_cases::merger::merge_tables;
pub use use_cases::report_generation::ReportGenerationUseCase;
pub use use_cases::statistics_pipeline::{PipelineOutput, StatisticsPipeline};
pub use use_cases::summary_formatter::format_summary;
pub use use_cases::table_loader::{LoadOutcome, TableLoader};
