//! Analyzer response as received, before validation.
//!
//! Every field is optional here so that missing data surfaces as a
//! `MalformedResponse` naming the offending path instead of a serde error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScores {
    pub positive: Option<f64>,
    pub neutral: Option<f64>,
    pub negative: Option<f64>,
}

impl RawScores {
    pub fn new(positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            positive: Some(positive),
            neutral: Some(neutral),
            negative: Some(negative),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    pub confidence_scores: Option<RawScores>,
    #[serde(default)]
    pub sentences: Vec<RawSentence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSentence {
    pub text: Option<String>,
    pub confidence_scores: Option<RawScores>,
    #[serde(default)]
    pub opinions: Vec<RawOpinion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOpinion {
    pub target: Option<RawTarget>,
    #[serde(default)]
    pub assessments: Vec<RawAssessment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTarget {
    pub text: Option<String>,
    pub sentiment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssessment {
    pub text: Option<String>,
    pub sentiment: Option<String>,
    #[serde(default)]
    pub is_negated: bool,
}
