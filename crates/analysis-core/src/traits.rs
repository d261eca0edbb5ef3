use crate::AnalysisError;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for company data collectors.
///
/// Each method fetches one category of raw company data from an external
/// source and returns it as an opaque attribute bag.
#[async_trait]
pub trait CompanyDataSource: Send + Sync {
    async fn fetch_basic_info(&self, company: &str) -> Result<Value, AnalysisError>;

    async fn fetch_recent_news(&self, company: &str, days: i64)
        -> Result<Vec<Value>, AnalysisError>;

    async fn fetch_market_data(&self, company: &str) -> Result<Value, AnalysisError>;
}

/// Trait for language-model completion backends
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a prompt and return the model's raw text response.
    async fn generate_completion(&self, prompt: &str) -> Result<String, AnalysisError>;
}
