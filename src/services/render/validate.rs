// Document Validation
// Explicit step between the raw API JSON and the typed document

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{ClassProbability, DetectionDocument, RawFallback, WireDocument};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document does not match the expected schema: {0}")]
    Schema(String),
    #[error("class probability '{0}' is not a number")]
    NonNumericProbability(String),
    #[error("class probability '{0}' is missing")]
    MissingClass(String),
    #[error("document has no {0}")]
    EmptySequence(&'static str),
}

/// Either a fully typed document or the raw JSON it came from.
#[derive(Debug, Clone)]
pub enum ValidatedDocument {
    Typed(DetectionDocument),
    RawFallback(RawFallback),
}

pub fn validate_document(raw: &Value) -> ValidatedDocument {
    match parse_document(raw) {
        Ok(doc) => ValidatedDocument::Typed(doc),
        Err(e) => {
            debug!(error = %e, "document.validation_failed");
            ValidatedDocument::RawFallback(RawFallback {
                reason: e.to_string(),
                raw: raw.clone(),
                summary: None,
            })
        }
    }
}

fn parse_document(raw: &Value) -> Result<DetectionDocument, RenderError> {
    if !raw.is_object() {
        return Err(RenderError::NotAnObject);
    }

    let wire = WireDocument::deserialize(raw).map_err(|e| RenderError::Schema(e.to_string()))?;

    let mut class_probabilities = Vec::with_capacity(wire.class_probabilities.len());
    for (class_name, value) in &wire.class_probabilities {
        let probability = value
            .as_f64()
            .ok_or_else(|| RenderError::NonNumericProbability(class_name.clone()))?;
        class_probabilities.push(ClassProbability {
            class_name: class_name.clone(),
            probability,
        });
    }

    Ok(DetectionDocument {
        predicted_class: wire.predicted_class,
        confidence_category: wire.confidence_category,
        confidence_score: wire.confidence_score,
        class_probabilities,
        result_message: wire.result_message,
        result_sub_message: wire.result_sub_message,
        sentences: wire.sentences,
        paragraphs: wire.paragraphs,
        overall_burstiness: wire.overall_burstiness,
        average_generated_prob: wire.average_generated_prob,
        document_classification: wire.document_classification,
        language: wire.language,
        version: wire.version,
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn sample_document() -> Value {
        json!({
            "predicted_class": "ai",
            "confidence_category": "high",
            "confidence_score": 0.9321,
            "class_probabilities": { "human": 0.05, "ai": 0.9, "mixed": 0.05 },
            "result_message": "Our detector is highly confident that the text is written by AI.",
            "result_sub_message": "",
            "sentences": [
                { "sentence": "First sentence.", "generated_prob": 0.91, "perplexity": 12.346, "highlight_sentence_for_ai": true },
                { "sentence": "Second sentence.", "generated_prob": 0.12, "perplexity": 80.0, "highlight_sentence_for_ai": false },
                { "sentence": "Third sentence.", "generated_prob": 0.5, "perplexity": 33.333, "highlight_sentence_for_ai": true }
            ],
            "paragraphs": [
                { "start_sentence_index": 0, "num_sentences": 2, "completely_generated_prob": 0.875 },
                { "start_sentence_index": 2, "num_sentences": 1, "completely_generated_prob": 0.1234 }
            ],
            "overall_burstiness": 0.4567,
            "average_generated_prob": 0.51,
            "document_classification": "AI_ONLY",
            "language": "en",
            "version": "2025-01-09-base"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_document;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document_is_typed() {
        match validate_document(&sample_document()) {
            ValidatedDocument::Typed(doc) => {
                assert_eq!(doc.predicted_class, "ai");
                assert_eq!(doc.sentences.len(), 3);
                assert_eq!(doc.paragraphs.len(), 2);
                assert_eq!(doc.result_sub_message.as_deref(), Some(""));
            }
            ValidatedDocument::RawFallback(f) => panic!("unexpected fallback: {}", f.reason),
        }
    }

    #[test]
    fn test_class_probability_order_preserved() {
        let ValidatedDocument::Typed(doc) = validate_document(&sample_document()) else {
            panic!("expected typed document");
        };
        let names: Vec<&str> = doc
            .class_probabilities
            .iter()
            .map(|c| c.class_name.as_str())
            .collect();
        assert_eq!(names, vec!["human", "ai", "mixed"]);
    }

    #[test]
    fn test_messages_are_optional() {
        let mut raw = sample_document();
        let obj = raw.as_object_mut().unwrap();
        obj.remove("result_message");
        obj.insert("result_sub_message".to_string(), Value::Null);

        let ValidatedDocument::Typed(doc) = validate_document(&raw) else {
            panic!("expected typed document");
        };
        assert!(doc.result_message.is_none());
        assert!(doc.result_sub_message.is_none());
    }

    #[test]
    fn test_missing_required_field_falls_back() {
        let mut raw = sample_document();
        raw.as_object_mut().unwrap().remove("paragraphs");

        match validate_document(&raw) {
            ValidatedDocument::RawFallback(f) => {
                assert!(f.reason.contains("paragraphs"));
                assert_eq!(f.raw, raw);
            }
            ValidatedDocument::Typed(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_wrong_type_falls_back() {
        let mut raw = sample_document();
        raw["confidence_score"] = json!("very");
        assert!(matches!(validate_document(&raw), ValidatedDocument::RawFallback(_)));
    }

    #[test]
    fn test_non_numeric_probability_falls_back() {
        let mut raw = sample_document();
        raw["class_probabilities"]["mixed"] = json!("n/a");
        match validate_document(&raw) {
            ValidatedDocument::RawFallback(f) => {
                assert_eq!(f.reason, RenderError::NonNumericProbability("mixed".into()).to_string());
            }
            ValidatedDocument::Typed(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_non_object_falls_back() {
        assert!(matches!(
            validate_document(&json!([1, 2, 3])),
            ValidatedDocument::RawFallback(_)
        ));
        assert!(matches!(validate_document(&Value::Null), ValidatedDocument::RawFallback(_)));
    }
}
