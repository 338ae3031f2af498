// Render Boundary
// The only place a malformed document is turned into the raw fallback view

use serde_json::Value;
use tracing::{info, warn};

use crate::models::{DetectionDocument, PresentationBundle, RawFallback, RenderOutcome};
use super::charts::{class_probability_chart, paragraph_chart};
use super::labels::message_lines;
use super::metrics::{additional_stats, summary_metrics};
use super::options::RenderOptions;
use super::tables::{class_probability_table, paragraph_table, sentence_table};
use super::validate::{validate_document, RenderError, ValidatedDocument};

pub const FALLBACK_NOTICE: &str = "Error parsing detailed results. Displaying raw JSON instead.";

/// Render one raw document. Never fails: anything that cannot be shown as a
/// full bundle is returned as `RenderOutcome::Fallback` carrying the raw JSON.
pub fn render_document(raw: &Value, options: &RenderOptions) -> RenderOutcome {
    let doc = match validate_document(raw) {
        ValidatedDocument::Typed(doc) => doc,
        ValidatedDocument::RawFallback(fallback) => {
            warn!(reason = %fallback.reason, "render.fallback");
            return RenderOutcome::Fallback(fallback);
        }
    };

    let summary = summary_metrics(&doc).ok();
    match build_bundle(&doc, options) {
        Ok(bundle) => {
            info!(
                paragraphs = bundle.paragraphs.len(),
                sentences = bundle.sentences.len(),
                classes = bundle.class_probabilities.len(),
                "render.ok"
            );
            RenderOutcome::Rendered(Box::new(bundle))
        }
        Err(e) => {
            warn!(reason = %e, "render.fallback");
            RenderOutcome::Fallback(RawFallback {
                reason: e.to_string(),
                raw: raw.clone(),
                summary,
            })
        }
    }
}

pub fn build_bundle(
    doc: &DetectionDocument,
    options: &RenderOptions,
) -> Result<PresentationBundle, RenderError> {
    let summary = summary_metrics(doc)?;
    if doc.paragraphs.is_empty() {
        return Err(RenderError::EmptySequence("paragraphs"));
    }
    if doc.sentences.is_empty() {
        return Err(RenderError::EmptySequence("sentences"));
    }
    let class_probabilities = class_probability_table(doc);
    let paragraphs = paragraph_table(doc);

    Ok(PresentationBundle {
        summary,
        messages: message_lines(doc, options.message_style),
        class_chart: class_probability_chart(&class_probabilities),
        class_probabilities,
        paragraph_chart: paragraph_chart(&paragraphs),
        paragraphs,
        sentences: sentence_table(doc),
        stats: additional_stats(doc),
    })
}
