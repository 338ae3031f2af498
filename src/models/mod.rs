// probeAI Data Models
// Wire schema of the detection API plus the presentation views derived from it

use serde::{Deserialize, Serialize};

// ============ Detection Request ============

/// Body POSTed to the detection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectRequest {
    pub document: String,
}

// ============ Wire Document ============

/// One entry of `documents` exactly as the detector sends it.
///
/// `class_probabilities` stays an untyped map here so that key order survives
/// and a missing or non-numeric entry can be reported precisely during
/// validation.
#[derive(Debug, Clone, Deserialize)]
pub struct WireDocument {
    pub predicted_class: String,
    pub confidence_category: String,
    pub confidence_score: f64,
    pub class_probabilities: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub result_message: Option<String>,
    #[serde(default)]
    pub result_sub_message: Option<String>,
    pub sentences: Vec<SentenceResult>,
    pub paragraphs: Vec<ParagraphResult>,
    pub overall_burstiness: f64,
    pub average_generated_prob: f64,
    pub document_classification: String,
    pub language: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceResult {
    pub sentence: String,
    pub generated_prob: f64,
    pub perplexity: f64,
    pub highlight_sentence_for_ai: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphResult {
    pub start_sentence_index: i64,
    pub num_sentences: i64,
    pub completely_generated_prob: f64,
}

// ============ Validated Document ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassProbability {
    pub class_name: String,
    pub probability: f64,
}

/// Fully typed detection document, produced only by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionDocument {
    pub predicted_class: String,
    pub confidence_category: String,
    pub confidence_score: f64,
    /// Wire order is preserved.
    pub class_probabilities: Vec<ClassProbability>,
    pub result_message: Option<String>,
    pub result_sub_message: Option<String>,
    pub sentences: Vec<SentenceResult>,
    pub paragraphs: Vec<ParagraphResult>,
    pub overall_burstiness: f64,
    pub average_generated_prob: f64,
    pub document_classification: String,
    pub language: String,
    pub version: String,
}

impl DetectionDocument {
    pub fn class_probability(&self, class_name: &str) -> Option<f64> {
        self.class_probabilities
            .iter()
            .find(|c| c.class_name == class_name)
            .map(|c| c.probability)
    }
}

// ============ Presentation Views ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub ai_probability: String,
    pub predicted_class: String,
    pub confidence_label: String,
    pub confidence_score: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassProbabilityRow {
    pub class_name: String,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphRow {
    /// 1-based position in the response, unrelated to any source id.
    pub paragraph_number: usize,
    pub start_sentence: i64,
    pub end_sentence: i64,
    pub sentence_count: i64,
    pub ai_probability_text: String,
    pub ai_probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRow {
    pub sentence: String,
    pub ai_probability_text: String,
    pub perplexity_text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClassificationBadge {
    AiOnly,
    HumanOnly,
    Mixed,
}

impl ClassificationBadge {
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationBadge::AiOnly => "AI Only",
            ClassificationBadge::HumanOnly => "Human Only",
            ClassificationBadge::Mixed => "Mixed",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ClassificationBadge::AiOnly => "🤖",
            ClassificationBadge::HumanOnly => "👤",
            ClassificationBadge::Mixed => "🤖👤",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MessageLine {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalStats {
    pub overall_burstiness: String,
    pub average_generated_prob: String,
    pub classification: ClassificationBadge,
    pub language: String,
    pub detector_version: String,
}

// ============ Chart Data ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// `#rrggbb`
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub horizontal: bool,
    pub width: u32,
    pub height: u32,
    pub bars: Vec<ChartBar>,
}

// ============ Render Result ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationBundle {
    pub summary: SummaryMetrics,
    pub messages: Vec<MessageLine>,
    pub class_probabilities: Vec<ClassProbabilityRow>,
    pub class_chart: BarChart,
    pub paragraphs: Vec<ParagraphRow>,
    pub paragraph_chart: BarChart,
    pub sentences: Vec<SentenceRow>,
    pub stats: AdditionalStats,
}

/// Raw document shown when it could not be turned into a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFallback {
    pub reason: String,
    pub raw: serde_json::Value,
    /// Headline metrics, kept when they could be computed before the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderOutcome {
    Rendered(Box<PresentationBundle>),
    Fallback(RawFallback),
}

impl RenderOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderOutcome::Fallback(_))
    }
}

/// One completed analysis, ready for any output writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub request_id: String,
    pub created_at: String,
    pub outcome: RenderOutcome,
}
