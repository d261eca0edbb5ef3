//! Composes the collectors, the insight generator, and the cache into the
//! single "get analysis for company" operation the API exposes.

use analysis_core::{
    AnalysisError, AnalysisRequest, CollectedData, CompanyDataSource, CompetitorIntelligence,
    CompletionProvider, DATA_SOURCE_TAGS,
};
use chrono::Utc;
use insight_engine::{InsightGenerator, InsightPayload};
use serde_json::{json, Value};
use std::sync::Arc;

pub mod cache;
pub use cache::{cache_key, AnalysisCache, CacheEntry};

/// Confidence substituted when a parsed model reply omits the score.
const DEFAULT_CONFIDENCE: i64 = 70;

/// Lookback window passed to the news collector, in days.
const NEWS_WINDOW_DAYS: i64 = 30;

pub struct AnalysisOrchestrator {
    data_source: Arc<dyn CompanyDataSource>,
    generator: InsightGenerator,
    cache: AnalysisCache,
}

impl AnalysisOrchestrator {
    pub fn new(
        data_source: Arc<dyn CompanyDataSource>,
        provider: Arc<dyn CompletionProvider>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            data_source,
            generator: InsightGenerator::new(provider),
            cache: AnalysisCache::new(cache_ttl_seconds),
        }
    }

    /// Number of cached analyses, reported by `/health`.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// End-to-end analysis for one request.
    ///
    /// Cache lookup, then on miss: concurrent collector fan-out, model
    /// generation, assembly with per-field defaults, cache write. A failed
    /// collector degrades to an error-tagged bag; a failed model call fails
    /// the whole request.
    pub async fn get_comprehensive_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<CompetitorIntelligence, AnalysisError> {
        if request.company.trim().is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "Company name is required".to_string(),
            ));
        }

        let key = cache_key(
            &request.company,
            request.market.as_deref(),
            request.focus_areas.as_deref(),
        );

        if let Some(entry) = self.cache.get(&key) {
            if self.cache.is_valid(&entry, Utc::now()) {
                tracing::info!("Returning cached analysis for {}", request.company);
                return Ok(entry.data);
            }
        }

        tracing::info!("Generating fresh analysis for {}", request.company);

        let (basic_info, recent_news, market_data) = tokio::join!(
            self.basic_info_or_placeholder(&request.company),
            self.recent_news_or_placeholder(&request.company),
            self.market_data_or_placeholder(&request.company),
        );

        let company = request.company.clone();
        let collected = CollectedData {
            basic_info,
            recent_news,
            market_data,
            analysis_request: request,
        };

        let insights = self.generator.generate(&collected).await?;
        let result = assemble(&company, insights.into_payload());

        self.cache.put(key, result.clone());
        Ok(result)
    }

    async fn basic_info_or_placeholder(&self, company: &str) -> Value {
        match self.data_source.fetch_basic_info(company).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!("Error fetching company info: {}", e);
                json!({ "name": company, "error": "Could not fetch basic info" })
            }
        }
    }

    async fn recent_news_or_placeholder(&self, company: &str) -> Vec<Value> {
        match self
            .data_source
            .fetch_recent_news(company, NEWS_WINDOW_DAYS)
            .await
        {
            Ok(news) => news,
            Err(e) => {
                tracing::error!("Error fetching news: {}", e);
                vec![json!({ "error": "Could not fetch recent news" })]
            }
        }
    }

    async fn market_data_or_placeholder(&self, company: &str) -> Value {
        match self.data_source.fetch_market_data(company).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Error fetching market data: {}", e);
                json!({ "error": "Could not fetch market data" })
            }
        }
    }
}

/// Build the final result from whatever fields the model supplied, filling
/// the rest with fixed defaults.
fn assemble(company: &str, payload: InsightPayload) -> CompetitorIntelligence {
    CompetitorIntelligence {
        company: company.to_string(),
        analysis_summary: payload.analysis_summary.unwrap_or_default(),
        strengths: payload.strengths.unwrap_or_default(),
        weaknesses: payload.weaknesses.unwrap_or_default(),
        opportunities: payload.opportunities.unwrap_or_default(),
        threats: payload.threats.unwrap_or_default(),
        market_position: payload.market_position.unwrap_or_default(),
        recommendations: payload.recommendations.unwrap_or_default(),
        confidence_score: payload
            .confidence_score
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0, 100) as u8,
        data_sources: DATA_SOURCE_TAGS.iter().map(|s| s.to_string()).collect(),
    }
}
