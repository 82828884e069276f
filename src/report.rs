//! Presentation data for the dashboard: formatted scores, the summary line and
//! the numbered opinion outline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sentiment::{AnalysisResult, ConfidenceScores, Verdict};

/// Render a fraction as a percentage with one decimal place (0.345 → "34.5%")
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// "Positive: 80.0% | Neutral: 15.0% | Negative: 5.0%"
pub fn score_line(scores: &ConfidenceScores) -> String {
    format!(
        "Positive: {} | Neutral: {} | Negative: {}",
        format_percent(scores.positive),
        format_percent(scores.neutral),
        format_percent(scores.negative)
    )
}

/// Per-category score cards
#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub positive: String,
    pub neutral: String,
    pub negative: String,
}

impl From<&ConfidenceScores> for ScoreCard {
    fn from(scores: &ConfidenceScores) -> Self {
        Self {
            positive: format_percent(scores.positive),
            neutral: format_percent(scores.neutral),
            negative: format_percent(scores.negative),
        }
    }
}

/// Everything the dashboard shows for one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub verdict: Verdict,
    pub color: &'static str,
    pub summary: String,
    pub rationale: &'static str,
    pub scores: ScoreCard,
    pub result: AnalysisResult,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, mixed_threshold: f64) -> Self {
        let verdict = result.verdict(mixed_threshold);

        Self {
            verdict,
            color: verdict.color().hex(),
            summary: verdict.summary(),
            rationale: verdict.rationale(),
            scores: ScoreCard::from(result.confidence_scores()),
            result,
            analyzed_at: Utc::now(),
        }
    }

    /// Plain-text rendering: summary, score cards, then the opinion outline
    pub fn render_text(&self) -> String {
        format!(
            "{}\n{}\n\n{}",
            self.summary,
            score_line(self.result.confidence_scores()),
            render_outline(&self.result)
        )
    }
}

/// Numbered outline of sentences, targets and assessments
pub fn render_outline(result: &AnalysisResult) -> String {
    let mut out = String::new();

    for sentence in result.sentences() {
        out.push_str(&format!(
            "{}) Sentence:\n{}\n{}\n",
            sentence.index(),
            sentence.text(),
            score_line(sentence.confidence_scores())
        ));

        for target in sentence.targets() {
            out.push_str(&format!(
                "  {}) Target: {} ({})\n",
                target.index(),
                target.text(),
                target.sentiment()
            ));

            for assessment in target.assessments() {
                let negated = if assessment.is_negated() { ", negated" } else { "" };
                out.push_str(&format!(
                    "    - {} ({}{})\n",
                    assessment.text(),
                    assessment.sentiment(),
                    negated
                ));
            }
        }
    }

    out
}
