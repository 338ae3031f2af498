// Labels & Messages
// Classification badge, message tone and the first-person message rewrite

use crate::models::{ClassificationBadge, DetectionDocument, MessageLine, Tone};
use super::options::MessageStyle;

const DETECTOR_PHRASE: &str = "Our detector is";
const FIRST_PERSON_PHRASE: &str = "I am";

/// Exact match on the two single-source labels; everything else is mixed.
pub fn classification_badge(document_classification: &str) -> ClassificationBadge {
    match document_classification {
        "AI_ONLY" => ClassificationBadge::AiOnly,
        "HUMAN_ONLY" => ClassificationBadge::HumanOnly,
        _ => ClassificationBadge::Mixed,
    }
}

pub fn tone_for_class(predicted_class: &str) -> Tone {
    if predicted_class.to_lowercase() == "human" {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

pub fn rewrite_message(text: &str) -> String {
    text.replace(DETECTOR_PHRASE, FIRST_PERSON_PHRASE)
}

/// Result message followed by the sub-message when it is non-empty, both
/// toned after the predicted class.
pub fn message_lines(doc: &DetectionDocument, style: MessageStyle) -> Vec<MessageLine> {
    let tone = tone_for_class(&doc.predicted_class);
    let styled = |text: &str| match style {
        MessageStyle::FirstPerson => rewrite_message(text),
        MessageStyle::Verbatim => text.to_string(),
    };

    let mut lines = Vec::with_capacity(2);
    if let Some(message) = doc.result_message.as_deref() {
        lines.push(MessageLine { text: styled(message), tone });
    }
    if let Some(sub) = doc.result_sub_message.as_deref().filter(|s| !s.is_empty()) {
        lines.push(MessageLine { text: styled(sub), tone });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::render::validate::fixtures::sample_document;
    use crate::services::render::{validate_document, ValidatedDocument};

    fn typed() -> DetectionDocument {
        match validate_document(&sample_document()) {
            ValidatedDocument::Typed(doc) => doc,
            ValidatedDocument::RawFallback(f) => panic!("fixture invalid: {}", f.reason),
        }
    }

    #[test]
    fn test_classification_badge() {
        assert_eq!(classification_badge("AI_ONLY"), ClassificationBadge::AiOnly);
        assert_eq!(classification_badge("HUMAN_ONLY"), ClassificationBadge::HumanOnly);
        assert_eq!(classification_badge("MIXED"), ClassificationBadge::Mixed);
        assert_eq!(classification_badge(""), ClassificationBadge::Mixed);
        assert_eq!(classification_badge("ai_only"), ClassificationBadge::Mixed);
        assert_eq!(classification_badge("???"), ClassificationBadge::Mixed);
    }

    #[test]
    fn test_tone_for_class() {
        assert_eq!(tone_for_class("Human"), Tone::Positive);
        assert_eq!(tone_for_class("HUMAN"), Tone::Positive);
        assert_eq!(tone_for_class("AI"), Tone::Negative);
        assert_eq!(tone_for_class("mixed"), Tone::Negative);
        assert_eq!(tone_for_class(""), Tone::Negative);
    }

    #[test]
    fn test_rewrite_message() {
        assert_eq!(rewrite_message("Our detector is 87% confident"), "I am 87% confident");
        assert_eq!(rewrite_message("Nothing to change here."), "Nothing to change here.");
        assert_eq!(rewrite_message("our detector is lower-case"), "our detector is lower-case");
    }

    #[test]
    fn test_message_lines_first_person() {
        let lines = message_lines(&typed(), MessageStyle::FirstPerson);
        assert_eq!(lines.len(), 1, "empty sub-message is skipped");
        assert_eq!(
            lines[0].text,
            "I am highly confident that the text is written by AI."
        );
        assert_eq!(lines[0].tone, Tone::Negative);
    }

    #[test]
    fn test_message_lines_verbatim() {
        let mut doc = typed();
        doc.predicted_class = "HUMAN".to_string();
        doc.result_sub_message = Some("Our detector is unsure about paragraph 2.".to_string());

        let lines = message_lines(&doc, MessageStyle::Verbatim);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].text.starts_with("Our detector is"));
        assert_eq!(lines[1].text, "Our detector is unsure about paragraph 2.");
        assert!(lines.iter().all(|l| l.tone == Tone::Positive));
    }

    #[test]
    fn test_message_lines_absent() {
        let mut doc = typed();
        doc.result_message = None;
        doc.result_sub_message = None;
        assert!(message_lines(&doc, MessageStyle::FirstPerson).is_empty());
    }
}
