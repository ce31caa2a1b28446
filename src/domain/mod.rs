pub mod dataset;
pub mod error;
pub mod llm_config;
pub mod report;
pub mod statistics;
