// Static informational copy shown next to the results

pub const HOW_IT_WORKS_TITLE: &str = "How it works";

pub const HOW_IT_WORKS: &str = "\
1. Text Analysis: Linguistic features of the input text, such as sentence structure, vocabulary usage, and writing style.
2. Pattern Recognition: Patterns commonly associated with AI-generated text, ex. unusual word combinations or overly consistent writing styles.
3. Statistical Models: Models trained on large datasets of both human-written and AI-generated text.
4. Probability Calculation: Likelihood of AI use with a confidence level for the prediction.

AI detectors produce false negatives. Detecting evasion is easy with informed prompting. However, false positives are rare, as characteristics of AI-generated text are seldom seen in human-written content. So when the detector confidently identifies AI use, it's usually right.";

pub const PERPLEXITY_TITLE: &str = "Perplexity in AI Detection";

pub const PERPLEXITY_INTRO: &str = "Perplexity measures how well a probability model predicts a sample, quantifying the model's \"surprise\" at the text.";

pub const PERPLEXITY_FORMULA: &str = "P(W) = 2^(-(1/N) * sum_{i=1..N} log2 P(w_i))";

pub const PERPLEXITY_TERMS: [&str; 3] = [
    "W is the text (sequence of words)",
    "N is the total number of words",
    "P(w_i) is the probability of each word",
];

pub const PERPLEXITY_INTERPRETATION: [&str; 2] = [
    "Lower perplexity: The model finds the text more predictable, potentially indicating AI-generated content.",
    "Higher perplexity: Often associated with human-written text due to its more diverse and less predictable nature.",
];

/// Sidebar as plain text, for the terminal.
pub fn sidebar_text() -> String {
    let mut out = String::new();
    out.push_str(HOW_IT_WORKS_TITLE);
    out.push_str("\n\n");
    out.push_str(HOW_IT_WORKS);
    out.push_str("\n\n");
    out.push_str(PERPLEXITY_TITLE);
    out.push_str("\n\n");
    out.push_str(PERPLEXITY_INTRO);
    out.push_str("\n\nFormula:\n    ");
    out.push_str(PERPLEXITY_FORMULA);
    out.push_str("\n\nWhere:\n");
    for term in PERPLEXITY_TERMS {
        out.push_str("  - ");
        out.push_str(term);
        out.push('\n');
    }
    out.push_str("\nInterpretation:\n");
    for line in PERPLEXITY_INTERPRETATION {
        out.push_str("  - ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_text_sections() {
        let text = sidebar_text();
        assert!(text.starts_with(HOW_IT_WORKS_TITLE));
        assert!(text.contains(PERPLEXITY_TITLE));
        assert!(text.contains(&format!("Formula:\n    {}", PERPLEXITY_FORMULA)));
        for term in PERPLEXITY_TERMS {
            assert!(text.contains(&format!("  - {}\n", term)), "missing term {:?}", term);
        }
        for line in PERPLEXITY_INTERPRETATION {
            assert!(text.contains(line));
        }
        let how = text.find(HOW_IT_WORKS_TITLE).unwrap();
        let perplexity = text.find(PERPLEXITY_TITLE).unwrap();
        assert!(how < perplexity);
    }
}
