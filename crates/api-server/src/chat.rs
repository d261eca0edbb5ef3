//! Fixed-format chat rendering for the webhook channel.

use analysis_core::CompetitorIntelligence;

/// Bullets shown per SWOT section in chat
const MAX_SECTION_ITEMS: usize = 3;
/// Recommendations shown in chat
const MAX_RECOMMENDATIONS: usize = 2;

fn bullet_lines(items: &[String], max: usize) -> String {
    items
        .iter()
        .take(max)
        .map(|item| format!("\u{2022} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render an analysis as the multi-section chat message.
pub fn render_analysis(analysis: &CompetitorIntelligence) -> String {
    format!(
        "\u{1F50D} **CompetiScope Analysis: {}**\n\n\
         \u{1F4CA} **Summary**: {}\n\n\
         \u{1F4AA} **Strengths**:\n{}\n\n\
         \u{26A0}\u{FE0F} **Weaknesses**:\n{}\n\n\
         \u{1F680} **Key Opportunities**:\n{}\n\n\
         \u{1F4A1} **Recommendations**:\n{}\n\n\
         \u{1F4C8} **Confidence Score**: {}%",
        analysis.company,
        analysis.analysis_summary,
        bullet_lines(&analysis.strengths, MAX_SECTION_ITEMS),
        bullet_lines(&analysis.weaknesses, MAX_SECTION_ITEMS),
        bullet_lines(&analysis.opportunities, MAX_SECTION_ITEMS),
        bullet_lines(&analysis.recommendations, MAX_RECOMMENDATIONS),
        analysis.confidence_score,
    )
}

pub fn greeting() -> String {
    "Hi! I'm CompetiScope \u{1F50D} I can analyze competitors for you. Try: 'analyze [company name]'"
        .to_string()
}

pub fn ask_for_company() -> String {
    "Please specify a company name to analyze. Example: 'analyze Apple' or 'research Tesla'"
        .to_string()
}

pub fn apology(company: &str) -> String {
    format!("Sorry, I couldn't analyze {company}. Please try again with a different company name.")
}

pub fn generic_apology() -> String {
    "Sorry, I encountered an error. Please try again.".to_string()
}
