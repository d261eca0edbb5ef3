use analysis_core::{AnalysisError, CompanyDataSource};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

/// Default lookback window for the news collector, in days.
pub const DEFAULT_NEWS_WINDOW_DAYS: i64 = 30;

/// Placeholder implementation of the three company-data collectors.
///
/// Returns simulated attribute bags shaped like the data a real provider
/// would return. Real integrations (news API, market data API) slot in
/// behind [`CompanyDataSource`] without touching the analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDataSource;

impl SimulatedDataSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompanyDataSource for SimulatedDataSource {
    async fn fetch_basic_info(&self, company: &str) -> Result<Value, AnalysisError> {
        Ok(json!({
            "name": company,
            "industry": "Technology",
            "founded": "Unknown",
            "headquarters": "Unknown",
            "employees": "Unknown",
            "description": format!("Information about {company}"),
            "source": "public_data",
        }))
    }

    async fn fetch_recent_news(
        &self,
        company: &str,
        days: i64,
    ) -> Result<Vec<Value>, AnalysisError> {
        tracing::debug!("Fetching news for {} ({} day window)", company, days);
        Ok(vec![json!({
            "title": format!("Recent developments at {company}"),
            "summary": format!("Latest news and updates about {company}"),
            "sentiment": "neutral",
            "date": Utc::now().to_rfc3339(),
            "source": "news_simulation",
        })])
    }

    async fn fetch_market_data(&self, _company: &str) -> Result<Value, AnalysisError> {
        Ok(json!({
            "market_cap": "Unknown",
            "stock_price": "Unknown",
            "revenue": "Unknown",
            "market_share": "Unknown",
            "growth_rate": "Unknown",
            "source": "market_simulation",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn basic_info_is_tagged_and_named() {
        let source = SimulatedDataSource::new();
        let info = source.fetch_basic_info("Apple").await.unwrap();

        assert_eq!(info["name"], "Apple");
        assert_eq!(info["source"], "public_data");
    }

    #[tokio::test]
    async fn news_mentions_the_company() {
        let source = SimulatedDataSource::new();
        let news = source
            .fetch_recent_news("Tesla", DEFAULT_NEWS_WINDOW_DAYS)
            .await
            .unwrap();

        assert_eq!(news.len(), 1);
        let title = news[0]["title"].as_str().unwrap();
        assert!(title.contains("Tesla"));
        assert_eq!(news[0]["source"], "news_simulation");
    }

    #[tokio::test]
    async fn market_data_is_tagged() {
        let source = SimulatedDataSource::new();
        let data = source.fetch_market_data("Apple").await.unwrap();

        assert_eq!(data["source"], "market_simulation");
    }
}
