use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tags recorded on every assembled analysis, one per contributing source.
pub const DATA_SOURCE_TAGS: &[&str] =
    &["company_data", "news_analysis", "market_data", "ai_analysis"];

/// An incoming analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Company name to analyze
    pub company: String,
    /// Market/industry sector
    #[serde(default)]
    pub market: Option<String>,
    /// Specific areas to focus on
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
}

impl AnalysisRequest {
    pub fn for_company(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            market: None,
            focus_areas: None,
        }
    }
}

/// Raw company data merged from all collectors for one cache miss.
///
/// The per-source bags are opaque: collectors return whatever attributes
/// their upstream provides, and the bags flow into the model prompt as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectedData {
    pub basic_info: Value,
    pub recent_news: Vec<Value>,
    pub market_data: Value,
    pub analysis_request: AnalysisRequest,
}

/// The structured competitive analysis returned to all callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorIntelligence {
    pub company: String,
    pub analysis_summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub market_position: String,
    pub recommendations: Vec<String>,
    /// Always within 0-100
    pub confidence_score: u8,
    pub data_sources: Vec<String>,
}
