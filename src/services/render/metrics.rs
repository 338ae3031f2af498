// Headline Metrics
// Summary row shown above the detailed results, plus the closing statistics block

use crate::models::{AdditionalStats, DetectionDocument, SummaryMetrics};
use super::format::{capitalize, format_decimal, format_percent};
use super::labels::classification_badge;
use super::validate::RenderError;

const AI_CLASS: &str = "ai";

/// Fails when `class_probabilities` carries no `ai` entry.
pub fn summary_metrics(doc: &DetectionDocument) -> Result<SummaryMetrics, RenderError> {
    let ai_prob = doc
        .class_probability(AI_CLASS)
        .ok_or_else(|| RenderError::MissingClass(AI_CLASS.to_string()))?;

    Ok(SummaryMetrics {
        ai_probability: format_percent(ai_prob),
        predicted_class: capitalize(&doc.predicted_class),
        confidence_label: capitalize(&doc.confidence_category),
        confidence_score: format_percent(doc.confidence_score),
    })
}

pub fn additional_stats(doc: &DetectionDocument) -> AdditionalStats {
    AdditionalStats {
        overall_burstiness: format_decimal(doc.overall_burstiness, 2),
        average_generated_prob: format_percent(doc.average_generated_prob),
        classification: classification_badge(&doc.document_classification),
        language: doc.language.clone(),
        detector_version: doc.version.clone(),
    }
}
