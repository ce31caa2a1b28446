pub mod aggregator;
pub mod merger;
pub mod prompts;
pub mod report_generation;
pub mod statistics_pipeline;
pub mod summary_formatter;
pub mod table_loader;
