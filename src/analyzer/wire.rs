//! Text Analytics v3.1 sentiment wire format.
//!
//! The service returns targets and assessments as sibling arrays per sentence
//! and links them with JSON-pointer relations. `into_raw` resolves those links
//! into the nested opinion shape the tree builder consumes.

use serde::{Deserialize, Serialize};

use crate::sentiment::{
    AnalysisError, RawAssessment, RawOpinion, RawResponse, RawScores, RawSentence, RawTarget,
};

#[derive(Debug, Serialize)]
pub struct SentimentRequest<'a> {
    pub documents: Vec<RequestDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequestDocument<'a> {
    pub id: &'a str,
    pub language: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResponse {
    #[serde(default)]
    pub documents: Vec<DocumentSentiment>,
    #[serde(default)]
    pub errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSentiment {
    pub id: String,
    pub confidence_scores: Option<RawScores>,
    #[serde(default)]
    pub sentences: Vec<SentenceSentiment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceSentiment {
    pub text: Option<String>,
    pub confidence_scores: Option<RawScores>,
    #[serde(default)]
    pub targets: Vec<SentenceTarget>,
    #[serde(default)]
    pub assessments: Vec<SentenceAssessment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceTarget {
    pub text: Option<String>,
    pub sentiment: Option<String>,
    #[serde(default)]
    pub relations: Vec<TargetRelation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRelation {
    pub relation_type: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAssessment {
    pub text: Option<String>,
    pub sentiment: Option<String>,
    #[serde(default)]
    pub is_negated: bool,
}

#[derive(Debug, Deserialize)]
pub struct DocumentError {
    pub id: String,
    pub error: ErrorBody,
}

/// Top-level error envelope returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl DocumentSentiment {
    /// Resolve target/assessment relations into nested opinions
    pub fn into_raw(self) -> Result<RawResponse, AnalysisError> {
        let mut sentences = Vec::with_capacity(self.sentences.len());

        for sentence in &self.sentences {
            let mut opinions = Vec::with_capacity(sentence.targets.len());

            for target in &sentence.targets {
                let assessments = target
                    .relations
                    .iter()
                    .filter(|r| r.relation_type.eq_ignore_ascii_case("assessment"))
                    .map(|r| self.resolve_assessment(&r.reference))
                    .collect::<Result<Vec<_>, _>>()?;

                opinions.push(RawOpinion {
                    target: Some(RawTarget {
                        text: target.text.clone(),
                        sentiment: target.sentiment.clone(),
                    }),
                    assessments,
                });
            }

            sentences.push(RawSentence {
                text: sentence.text.clone(),
                confidence_scores: sentence.confidence_scores.clone(),
                opinions,
            });
        }

        Ok(RawResponse {
            confidence_scores: self.confidence_scores,
            sentences,
        })
    }

    fn resolve_assessment(&self, reference: &str) -> Result<RawAssessment, AnalysisError> {
        let (sentence, assessment) = parse_assessment_ref(reference)?;

        let found = self
            .sentences
            .get(sentence)
            .and_then(|s| s.assessments.get(assessment))
            .ok_or_else(|| {
                AnalysisError::MalformedResponse(format!("dangling assessment ref {}", reference))
            })?;

        Ok(RawAssessment {
            text: found.text.clone(),
            sentiment: found.sentiment.clone(),
            is_negated: found.is_negated,
        })
    }
}

/// Parse `#/documents/D/sentences/S/assessments/A` into `(S, A)`
fn parse_assessment_ref(reference: &str) -> Result<(usize, usize), AnalysisError> {
    let malformed =
        || AnalysisError::MalformedResponse(format!("invalid assessment ref {}", reference));

    let path = reference.strip_prefix("#/").ok_or_else(malformed)?;
    let parts: Vec<&str> = path.split('/').collect();

    match parts.as_slice() {
        ["documents", _, "sentences", s, "assessments", a] => {
            let s: usize = s.parse().map_err(|_| malformed())?;
            let a: usize = a.parse().map_err(|_| malformed())?;
            Ok((s, a))
        }
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assessment_ref() {
        assert_eq!(
            parse_assessment_ref("#/documents/0/sentences/2/assessments/1").unwrap(),
            (2, 1)
        );
    }

    #[test]
    fn test_parse_assessment_ref_rejects_other_paths() {
        assert!(parse_assessment_ref("#/documents/0/sentences/2/targets/1").is_err());
        assert!(parse_assessment_ref("documents/0/sentences/0/assessments/0").is_err());
        assert!(parse_assessment_ref("#/documents/0/sentences/x/assessments/0").is_err());
    }

    #[test]
    fn test_document_labels_are_not_required() {
        // the verdict is derived from scores, so document and sentence labels may be absent
        let json = r#"{
            "documents": [{
                "id": "1",
                "confidenceScores": {"positive": 0.7, "neutral": 0.2, "negative": 0.1},
                "sentences": [{
                    "text": "Nice.",
                    "confidenceScores": {"positive": 0.7, "neutral": 0.2, "negative": 0.1}
                }]
            }],
            "errors": []
        }"#;
        let response: SentimentResponse = serde_json::from_str(json).unwrap();
        let raw = response.documents.into_iter().next().unwrap().into_raw().unwrap();

        assert_eq!(raw.confidence_scores, Some(RawScores::new(0.7, 0.2, 0.1)));
        assert_eq!(raw.sentences.len(), 1);
        assert!(raw.sentences[0].opinions.is_empty());
    }
}
