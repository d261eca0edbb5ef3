use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Completion error: {0}")]
    Completion(String),
}
