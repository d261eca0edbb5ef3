//! Turns collected company data into structured competitive insights via a
//! language model.
//!
//! The model is asked for a fixed JSON shape. Its reply is parsed
//! field-by-field into [`InsightPayload`]; a reply that does not parse is an
//! expected condition and yields the canned fallback payload rather than an
//! error. Only provider failures (endpoint unreachable, auth, bad status)
//! propagate.

use analysis_core::{AnalysisError, CollectedData, CompletionProvider};
use serde::Deserialize;
use std::sync::Arc;

/// Confidence reported by the canned fallback payload.
pub const FALLBACK_CONFIDENCE: i64 = 60;

/// Best-effort view of the model's JSON reply. Every field is optional;
/// defaulting happens downstream at assembly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsightPayload {
    #[serde(default)]
    pub analysis_summary: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default)]
    pub opportunities: Option<Vec<String>>,
    #[serde(default)]
    pub threats: Option<Vec<String>>,
    #[serde(default)]
    pub market_position: Option<String>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub confidence_score: Option<i64>,
}

/// Outcome of a generation: either the model's own payload or the canned
/// stand-in used when its reply could not be parsed.
#[derive(Debug, Clone)]
pub enum GeneratedInsights {
    Parsed(InsightPayload),
    Fallback(InsightPayload),
}

impl GeneratedInsights {
    pub fn into_payload(self) -> InsightPayload {
        match self {
            GeneratedInsights::Parsed(p) | GeneratedInsights::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, GeneratedInsights::Fallback(_))
    }
}

pub struct InsightGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl InsightGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Run one analysis over the collected data.
    ///
    /// Provider errors are fatal for the request and propagate unchanged.
    pub async fn generate(&self, data: &CollectedData) -> Result<GeneratedInsights, AnalysisError> {
        let prompt = build_prompt(data);
        let response = self.provider.generate_completion(&prompt).await?;

        match serde_json::from_str::<InsightPayload>(response.trim()) {
            Ok(payload) => Ok(GeneratedInsights::Parsed(payload)),
            Err(e) => {
                tracing::warn!("Failed to parse model response as JSON: {}", e);
                Ok(GeneratedInsights::Fallback(fallback_payload(data)))
            }
        }
    }
}

/// Render the analyst prompt for one collected data set.
pub fn build_prompt(data: &CollectedData) -> String {
    let company_data =
        serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());

    let focus = match &data.analysis_request.focus_areas {
        Some(areas) if !areas.is_empty() => areas.join(", "),
        _ => "comprehensive analysis".to_string(),
    };

    format!(
        r#"You are CompetiScope, an expert competitive intelligence analyst. Analyze the following company data and provide comprehensive competitive intelligence.

Company Data:
{company_data}

Focus Areas: {focus}

Provide analysis in the following JSON format:
{{
    "analysis_summary": "2-3 sentence executive summary of key competitive insights",
    "strengths": ["strength1", "strength2", "strength3"],
    "weaknesses": ["weakness1", "weakness2", "weakness3"],
    "opportunities": ["opportunity1", "opportunity2", "opportunity3"],
    "threats": ["threat1", "threat2", "threat3"],
    "market_position": "Analysis of current market positioning and competitive stance",
    "recommendations": ["actionable recommendation 1", "actionable recommendation 2", "actionable recommendation 3"],
    "confidence_score": 85
}}

Be specific, actionable, and business-focused. Base insights on the provided data but also use your knowledge about the industry and market dynamics."#
    )
}

/// Canned generic analysis used when the model reply cannot be parsed.
fn fallback_payload(data: &CollectedData) -> InsightPayload {
    let name = data.basic_info["name"].as_str().unwrap_or("company");

    InsightPayload {
        analysis_summary: Some(format!(
            "Basic analysis of {name} based on available data."
        )),
        strengths: Some(vec![
            "Market presence".to_string(),
            "Brand recognition".to_string(),
            "Innovation capability".to_string(),
        ]),
        weaknesses: Some(vec![
            "Limited data available".to_string(),
            "Market competition".to_string(),
            "Economic sensitivity".to_string(),
        ]),
        opportunities: Some(vec![
            "Digital transformation".to_string(),
            "Market expansion".to_string(),
            "Strategic partnerships".to_string(),
        ]),
        threats: Some(vec![
            "Economic uncertainty".to_string(),
            "Competitive pressure".to_string(),
            "Regulatory changes".to_string(),
        ]),
        market_position: Some(
            "Competitive position requires further analysis with more comprehensive data."
                .to_string(),
        ),
        recommendations: Some(vec![
            "Conduct deeper market research".to_string(),
            "Monitor competitor activities".to_string(),
            "Focus on differentiation".to_string(),
        ]),
        confidence_score: Some(FALLBACK_CONFIDENCE),
    }
}
