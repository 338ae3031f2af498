// Result Tables
// Row views over class probabilities, paragraphs and sentences

use crate::models::{ClassProbabilityRow, DetectionDocument, ParagraphRow, SentenceRow};
use super::format::{format_decimal, format_percent};

/// One row per class, in the order the detector sent them.
pub fn class_probability_table(doc: &DetectionDocument) -> Vec<ClassProbabilityRow> {
    doc.class_probabilities
        .iter()
        .map(|c| ClassProbabilityRow {
            class_name: c.class_name.clone(),
            probability: c.probability,
        })
        .collect()
}

/// Paragraph numbers are positional. The end index is plain arithmetic and is
/// not checked against the sentence count.
pub fn paragraph_table(doc: &DetectionDocument) -> Vec<ParagraphRow> {
    doc.paragraphs
        .iter()
        .enumerate()
        .map(|(i, p)| ParagraphRow {
            paragraph_number: i + 1,
            start_sentence: p.start_sentence_index,
            end_sentence: p
                .start_sentence_index
                .saturating_add(p.num_sentences)
                .saturating_sub(1),
            sentence_count: p.num_sentences,
            ai_probability_text: format_percent(p.completely_generated_prob),
            ai_probability: p.completely_generated_prob,
        })
        .collect()
}

pub fn sentence_table(doc: &DetectionDocument) -> Vec<SentenceRow> {
    doc.sentences
        .iter()
        .map(|s| SentenceRow {
            sentence: s.sentence.clone(),
            ai_probability_text: format_percent(s.generated_prob),
            perplexity_text: format_decimal(s.perplexity, 2),
            highlighted: s.highlight_sentence_for_ai,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParagraphResult;
    use crate::services::render::validate::fixtures::sample_document;
    use crate::services::render::{validate_document, ValidatedDocument};

    fn typed() -> DetectionDocument {
        match validate_document(&sample_document()) {
            ValidatedDocument::Typed(doc) => doc,
            ValidatedDocument::RawFallback(f) => panic!("fixture invalid: {}", f.reason),
        }
    }

    fn paragraph(start: i64, count: i64, prob: f64) -> ParagraphResult {
        ParagraphResult {
            start_sentence_index: start,
            num_sentences: count,
            completely_generated_prob: prob,
        }
    }

    #[test]
    fn test_class_probability_table_order() {
        let rows = class_probability_table(&typed());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].class_name, "human");
        assert_eq!(rows[1].class_name, "ai");
        assert_eq!(rows[1].probability, 0.9);
        assert_eq!(rows[2].class_name, "mixed");
    }

    #[test]
    fn test_paragraph_table() {
        let rows = paragraph_table(&typed());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].paragraph_number, 1);
        assert_eq!(rows[0].start_sentence, 0);
        assert_eq!(rows[0].end_sentence, 1);
        assert_eq!(rows[0].sentence_count, 2);
        assert_eq!(rows[0].ai_probability_text, "87.50%");
        assert_eq!(rows[1].paragraph_number, 2);
        assert_eq!(rows[1].end_sentence, 2);
        assert_eq!(rows[1].ai_probability_text, "12.34%");
        assert_eq!(rows[1].ai_probability, 0.1234);
    }

    #[test]
    fn test_paragraph_numbers_are_positional() {
        let mut doc = typed();
        doc.paragraphs = vec![paragraph(9, 3, 0.2), paragraph(0, 1, 0.4), paragraph(4, 2, 0.6)];

        let rows = paragraph_table(&doc);
        let numbers: Vec<usize> = rows.iter().map(|r| r.paragraph_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        for (row, p) in rows.iter().zip(doc.paragraphs.iter()) {
            assert_eq!(row.end_sentence, p.start_sentence_index + p.num_sentences - 1);
        }
    }

    #[test]
    fn test_paragraph_end_is_not_clamped() {
        let mut doc = typed();
        doc.paragraphs = vec![paragraph(2, 10, 0.5), paragraph(0, 0, 0.0)];

        let rows = paragraph_table(&doc);
        assert_eq!(rows[0].end_sentence, 11);
        assert!(rows[0].end_sentence as usize >= doc.sentences.len());
        assert_eq!(rows[1].end_sentence, -1);
    }

    #[test]
    fn test_paragraph_table_extreme_values_do_not_panic() {
        let mut doc = typed();
        doc.paragraphs = vec![paragraph(i64::MAX, i64::MAX, 1.0), paragraph(i64::MIN, 0, 0.0)];
        let rows = paragraph_table(&doc);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_sentence_table() {
        let rows = sentence_table(&typed());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].sentence, "First sentence.");
        assert_eq!(rows[0].ai_probability_text, "91.00%");
        assert_eq!(rows[0].perplexity_text, "12.35");
        assert!(rows[0].highlighted);
        assert_eq!(rows[1].perplexity_text, "80.00");
        assert!(!rows[1].highlighted);
    }
}
