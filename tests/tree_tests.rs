// Integration tests for the opinion tree builder
//
// These tests verify ordering, numbering, empty sequences and the two
// hard failure modes (malformed input, unknown sentiment labels).

use loqa_sentiment::sentiment::{
    build, build_json, AnalysisError, RawAssessment, RawOpinion, RawResponse, RawScores,
    RawSentence, RawTarget, SentimentLabel, Verdict, DEFAULT_MIXED_THRESHOLD,
};

fn assessment(text: &str, sentiment: &str) -> RawAssessment {
    RawAssessment {
        text: Some(text.to_string()),
        sentiment: Some(sentiment.to_string()),
        is_negated: false,
    }
}

fn opinion(target: &str, sentiment: &str, assessments: Vec<RawAssessment>) -> RawOpinion {
    RawOpinion {
        target: Some(RawTarget {
            text: Some(target.to_string()),
            sentiment: Some(sentiment.to_string()),
        }),
        assessments,
    }
}

fn sentence(text: &str, opinions: Vec<RawOpinion>) -> RawSentence {
    RawSentence {
        text: Some(text.to_string()),
        confidence_scores: Some(RawScores::new(0.6, 0.3, 0.1)),
        opinions,
    }
}

fn response(sentences: Vec<RawSentence>) -> RawResponse {
    RawResponse {
        confidence_scores: Some(RawScores::new(0.7, 0.2, 0.1)),
        sentences,
    }
}

#[test]
fn test_sentence_without_opinions_has_empty_targets() {
    let raw = response(vec![sentence("The weather is fine.", vec![])]);

    let result = build(&raw).unwrap();

    assert_eq!(result.sentences().len(), 1);
    assert_eq!(result.sentences()[0].text(), "The weather is fine.");
    assert!(result.sentences()[0].targets().is_empty());
}

#[test]
fn test_empty_sentence_sequence_is_valid() {
    let raw = response(vec![]);

    let result = build(&raw).unwrap();

    assert!(result.sentences().is_empty());
    assert_eq!(result.confidence_scores().positive, 0.7);
}

#[test]
fn test_order_and_numbering_preserved() {
    let raw = response(vec![
        sentence(
            "The food was great but the service was slow.",
            vec![
                opinion(
                    "service",
                    "negative",
                    vec![assessment("slow", "negative"), assessment("rude", "negative")],
                ),
                opinion("food", "positive", vec![assessment("great", "positive")]),
            ],
        ),
        sentence("I will come back.", vec![]),
        sentence(
            "Prices are okay.",
            vec![opinion("prices", "neutral", vec![])],
        ),
    ]);

    let result = build(&raw).unwrap();
    let sentences = result.sentences();

    let indices: Vec<usize> = sentences.iter().map(|s| s.index()).collect();
    assert_eq!(indices, vec![1, 2, 3]);

    // targets stay in arrival order, not alphabetical
    let first = &sentences[0];
    assert_eq!(first.targets()[0].text(), "service");
    assert_eq!(first.targets()[0].index(), 1);
    assert_eq!(first.targets()[1].text(), "food");
    assert_eq!(first.targets()[1].index(), 2);

    let assessments: Vec<&str> = first.targets()[0]
        .assessments()
        .iter()
        .map(|a| a.text())
        .collect();
    assert_eq!(assessments, vec!["slow", "rude"]);

    // numbering restarts per sentence
    assert_eq!(sentences[2].targets()[0].index(), 1);
    assert_eq!(result.target_count(), 3);
}

#[test]
fn test_duplicates_are_kept() {
    let raw = response(vec![sentence(
        "Good food, good food.",
        vec![
            opinion("food", "positive", vec![assessment("good", "positive")]),
            opinion("food", "positive", vec![assessment("good", "positive")]),
        ],
    )]);

    let result = build(&raw).unwrap();
    assert_eq!(result.sentences()[0].targets().len(), 2);
}

#[test]
fn test_labels_taken_verbatim() {
    // sentence scores favour positive, but the target label is not recomputed
    let raw = response(vec![sentence(
        "Mostly nice.",
        vec![opinion("room", "mixed", vec![assessment("cramped", "Negative")])],
    )]);

    let result = build(&raw).unwrap();
    let target = &result.sentences()[0].targets()[0];

    assert_eq!(target.sentiment(), SentimentLabel::Mixed);
    assert_eq!(target.assessments()[0].sentiment(), SentimentLabel::Negative);
}

#[test]
fn test_unknown_assessment_label_fails() {
    let raw = response(vec![sentence(
        "Hmm.",
        vec![opinion("thing", "neutral", vec![assessment("odd", "Unclear")])],
    )]);

    assert_eq!(
        build(&raw),
        Err(AnalysisError::UnknownSentimentLabel("Unclear".to_string()))
    );
}

#[test]
fn test_unknown_target_label_fails() {
    let raw = response(vec![sentence(
        "Hmm.",
        vec![opinion("thing", "somewhat", vec![])],
    )]);

    assert!(matches!(
        build(&raw),
        Err(AnalysisError::UnknownSentimentLabel(_))
    ));
}

#[test]
fn test_missing_document_scores_is_malformed() {
    let raw = RawResponse {
        confidence_scores: None,
        sentences: vec![],
    };

    assert!(matches!(build(&raw), Err(AnalysisError::MalformedResponse(_))));
}

#[test]
fn test_missing_sentence_fields_are_malformed() {
    let mut no_text = sentence("x", vec![]);
    no_text.text = None;

    let mut no_scores = sentence("x", vec![]);
    no_scores.confidence_scores = None;

    let mut partial_scores = sentence("x", vec![]);
    partial_scores.confidence_scores = Some(RawScores {
        positive: Some(0.5),
        neutral: None,
        negative: Some(0.5),
    });

    for bad in [no_text, no_scores, partial_scores] {
        let raw = response(vec![sentence("fine", vec![]), bad]);
        match build(&raw) {
            Err(AnalysisError::MalformedResponse(msg)) => {
                assert!(msg.contains("sentences[1]"), "unexpected message: {}", msg)
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }
}

#[test]
fn test_out_of_range_scores_are_malformed() {
    let mut raw = response(vec![]);
    raw.confidence_scores = Some(RawScores::new(1.5, 0.0, 0.0));

    assert!(matches!(build(&raw), Err(AnalysisError::MalformedResponse(_))));
}

#[test]
fn test_build_json() {
    let json = r#"{
        "confidence_scores": {"positive": 0.45, "neutral": 0.10, "negative": 0.45},
        "sentences": [
            {
                "text": "Loved the screen, hated the battery.",
                "confidence_scores": {"positive": 0.45, "neutral": 0.10, "negative": 0.45},
                "opinions": [
                    {
                        "target": {"text": "screen", "sentiment": "positive"},
                        "assessments": [{"text": "loved", "sentiment": "positive"}]
                    },
                    {
                        "target": {"text": "battery", "sentiment": "negative"},
                        "assessments": [{"text": "hated", "sentiment": "negative", "is_negated": false}]
                    }
                ]
            }
        ]
    }"#;

    let result = build_json(json).unwrap();

    assert_eq!(result.verdict(DEFAULT_MIXED_THRESHOLD), Verdict::Mixed);
    assert_eq!(result.sentences()[0].targets()[1].text(), "battery");
}

#[test]
fn test_build_json_rejects_invalid_json() {
    assert!(matches!(
        build_json("{not json"),
        Err(AnalysisError::MalformedResponse(_))
    ));
}

#[test]
fn test_rebuilding_yields_equal_tree() {
    let raw = response(vec![sentence(
        "Nice.",
        vec![opinion("it", "positive", vec![assessment("nice", "positive")])],
    )]);

    assert_eq!(build(&raw).unwrap(), build(&raw).unwrap());
}
