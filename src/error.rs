use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No search term report supplied: {0}")]
    MissingInput(String),

    #[error("{file}: required column '{column}' not found")]
    MissingColumn { file: String, column: String },

    #[error("Unsupported input: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
