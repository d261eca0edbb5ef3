//! Webhook Routes
//!
//! Chat-style entry point: parses free-text commands ("analyze X") and
//! replies with the rendered analysis. This route never returns an error
//! status; every outcome, including analysis failure, is a friendly JSON
//! reply.

use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;

use analysis_core::AnalysisRequest;

use crate::{chat, AppState};

/// Verbs that trigger an analysis when they open a message
const TRIGGER_VERBS: &[&str] = &["analyze", "check", "research"];

pub fn routes() -> Router<AppState> {
    Router::new().route("/webhook/telex", post(telex_webhook))
}

#[derive(Serialize)]
struct WebhookReply {
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Analyze(String),
    MissingCompany,
    Unrecognized,
}

fn parse_command(content: &str) -> Command {
    let lower = content.to_lowercase();
    if !TRIGGER_VERBS.iter().any(|verb| lower.starts_with(verb)) {
        return Command::Unrecognized;
    }

    match content.split_once(' ') {
        Some((_, company)) if !company.trim().is_empty() => {
            Command::Analyze(company.trim().to_string())
        }
        _ => Command::MissingCompany,
    }
}

async fn telex_webhook(State(state): State<AppState>, body: String) -> Json<WebhookReply> {
    let Ok(data) = serde_json::from_str::<Value>(&body) else {
        return Json(WebhookReply {
            response: chat::generic_apology(),
            channel_id: None,
            user_id: None,
            error: Some("invalid payload".to_string()),
        });
    };

    let content = data["content"].as_str().unwrap_or("").trim().to_string();
    let channel_id = data["channel_id"].as_str().unwrap_or("").to_string();
    let user_id = data["user_id"].as_str().unwrap_or("").to_string();

    tracing::info!("Received Telex message: {}", content);

    match parse_command(&content) {
        Command::Analyze(company) => {
            let request = AnalysisRequest::for_company(company.clone());
            match state.orchestrator.get_comprehensive_analysis(request).await {
                Ok(analysis) => Json(WebhookReply {
                    response: chat::render_analysis(&analysis),
                    channel_id: Some(channel_id),
                    user_id: Some(user_id),
                    error: None,
                }),
                Err(e) => {
                    tracing::error!("Webhook analysis failed for {}: {}", company, e);
                    Json(WebhookReply {
                        response: chat::apology(&company),
                        channel_id: Some(channel_id),
                        user_id: None,
                        error: Some(e.to_string()),
                    })
                }
            }
        }
        Command::MissingCompany => Json(WebhookReply {
            response: chat::ask_for_company(),
            channel_id: Some(channel_id),
            user_id: None,
            error: None,
        }),
        Command::Unrecognized => Json(WebhookReply {
            response: chat::greeting(),
            channel_id: Some(channel_id),
            user_id: None,
            error: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{AnalysisError, CompletionProvider};
    use analysis_orchestrator::AnalysisOrchestrator;
    use async_trait::async_trait;
    use data_sources::SimulatedDataSource;
    use std::sync::Arc;

    struct CannedProvider(Result<&'static str, &'static str>);

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn generate_completion(&self, _prompt: &str) -> Result<String, AnalysisError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(AnalysisError::Completion(msg.to_string())),
            }
        }
    }

    fn state_with(provider: CannedProvider) -> AppState {
        AppState {
            orchestrator: Arc::new(AnalysisOrchestrator::new(
                Arc::new(SimulatedDataSource::new()),
                Arc::new(provider),
                3600,
            )),
            gemini_configured: true,
        }
    }

    #[tokio::test]
    async fn analyze_command_renders_the_analysis() {
        let state = state_with(CannedProvider(Ok(
            r#"{ "analysis_summary": "Strong.", "confidence_score": 80 }"#,
        )));
        let body =
            r#"{ "content": "analyze Apple", "channel_id": "c1", "user_id": "u1" }"#.to_string();

        let reply = telex_webhook(State(state), body).await.0;

        assert!(reply.response.contains("CompetiScope Analysis: Apple"));
        assert_eq!(reply.channel_id.as_deref(), Some("c1"));
        assert_eq!(reply.user_id.as_deref(), Some("u1"));
        assert!(reply.error.is_none());
    }

    #[tokio::test]
    async fn failed_analysis_becomes_an_apology() {
        let state = state_with(CannedProvider(Err("endpoint unreachable")));
        let body =
            r#"{ "content": "analyze Tesla", "channel_id": "c1", "user_id": "u1" }"#.to_string();

        let reply = telex_webhook(State(state), body).await.0;

        assert!(reply.response.contains("couldn't analyze Tesla"));
        assert!(reply.error.is_some());
    }

    #[tokio::test]
    async fn unrecognized_message_gets_the_greeting() {
        let state = state_with(CannedProvider(Ok("{}")));
        let body = r#"{ "content": "hello", "channel_id": "c1", "user_id": "u1" }"#.to_string();

        let reply = telex_webhook(State(state), body).await.0;
        assert_eq!(reply.response, chat::greeting());
    }

    #[tokio::test]
    async fn invalid_body_gets_the_generic_apology() {
        let state = state_with(CannedProvider(Ok("{}")));

        let reply = telex_webhook(State(state), "not json".to_string()).await.0;
        assert_eq!(reply.response, chat::generic_apology());
        assert!(reply.error.is_some());
    }

    #[test]
    fn bare_analyze_asks_for_a_company() {
        assert_eq!(parse_command("analyze"), Command::MissingCompany);
        assert_eq!(parse_command("analyze   "), Command::MissingCompany);
    }

    #[test]
    fn unrelated_message_is_unrecognized() {
        assert_eq!(parse_command("hello"), Command::Unrecognized);
        assert_eq!(parse_command(""), Command::Unrecognized);
    }

    #[test]
    fn trigger_verbs_extract_the_company() {
        assert_eq!(
            parse_command("analyze Apple"),
            Command::Analyze("Apple".to_string())
        );
        assert_eq!(
            parse_command("research Tesla Motors"),
            Command::Analyze("Tesla Motors".to_string())
        );
        assert_eq!(
            parse_command("Check Microsoft"),
            Command::Analyze("Microsoft".to_string())
        );
    }

    #[test]
    fn extra_whitespace_around_company_is_trimmed() {
        assert_eq!(
            parse_command("analyze   Apple Inc"),
            Command::Analyze("Apple Inc".to_string())
        );
    }
}
