use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The input directory is missing or is not a directory.
    DirectoryNotFound(String),
    /// Nothing survived loading, so there is nothing to report on.
    EmptyDataset,
    ParseError(String),
    ValidationError(String),
    ConfigError(String),
    LLMError(String),
    IoError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DirectoryNotFound(path) => {
                write!(f, "Directory not found: {} does not exist or is not a directory", path)
            }
            AppError::EmptyDataset => write!(
                f,
                "No data found: no CSV or spreadsheet table could be loaded"
            ),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
