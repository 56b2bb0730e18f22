/// Errors that can occur while writing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error creating or writing a report file
    #[error("Failed to write report: {0}")]
    IoError(#[from] std::io::Error),

    /// TSV serialization error
    #[error("TSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
