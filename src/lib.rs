pub mod application;
pub mod domain;
pub mod infrastructure;
mod interfaces;

mod app;

pub use app::run;
pub use application::{PipelineOutput, StatisticsPipeline};
pub use domain::error::{AppError, Result};
pub use domain::statistics::StatisticsReport;
