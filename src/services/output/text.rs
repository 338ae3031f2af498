// Terminal Report
// Plain-text rendering of an analysis, optionally with ANSI color

use std::io::{self, Write};

use crate::models::{
    Analysis, BarChart, PresentationBundle, RawFallback, RenderOutcome, SentenceRow,
    SummaryMetrics, Tone,
};
use crate::services::render::{ChartLayout, FALLBACK_NOTICE};
use super::WriteOptions;

const BAR_WIDTH: usize = 24;
const COLUMN_GAP: usize = 4;

const BOLD: &str = "\u{1b}[1m";
const RED: &str = "\u{1b}[31m";
const GREEN: &str = "\u{1b}[32m";
const DIM: &str = "\u{1b}[2m";
const RESET: &str = "\u{1b}[0m";

fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn write<W: Write>(writer: &mut W, analysis: &Analysis, options: &WriteOptions) -> io::Result<()> {
    match &analysis.outcome {
        RenderOutcome::Rendered(bundle) => write_bundle(writer, bundle, options),
        RenderOutcome::Fallback(fallback) => write_fallback(writer, fallback, options),
    }
}

fn write_fallback<W: Write>(writer: &mut W, fallback: &RawFallback, options: &WriteOptions) -> io::Result<()> {
    if let Some(summary) = &fallback.summary {
        write_summary(writer, summary, options.color)?;
    }
    writeln!(writer, "{}", paint(FALLBACK_NOTICE, RED, options.color))?;
    writeln!(writer, "{}", paint(&format!("({})", fallback.reason), DIM, options.color))?;
    writeln!(writer)?;
    let raw = serde_json::to_string_pretty(&fallback.raw)?;
    writeln!(writer, "{}", raw)
}

fn write_bundle<W: Write>(writer: &mut W, bundle: &PresentationBundle, options: &WriteOptions) -> io::Result<()> {
    let color = options.color;
    let heading = |title: &str| paint(title, BOLD, color);

    write_summary(writer, &bundle.summary, color)?;

    writeln!(writer, "{}", heading("Detailed Results"))?;
    for message in &bundle.messages {
        let (marker, code) = match message.tone {
            Tone::Positive => ("[+]", GREEN),
            Tone::Negative => ("[!]", RED),
        };
        writeln!(writer, "{}", paint(&format!("{} {}", marker, message.text), code, color))?;
    }
    writeln!(writer)?;

    let class_block = chart_block(&bundle.class_chart, &heading);
    let paragraph_block = paragraph_block(bundle, &heading);
    match options.layout {
        ChartLayout::SideBySide => {
            for line in side_by_side(&class_block, &paragraph_block, COLUMN_GAP) {
                writeln!(writer, "{}", line.trim_end())?;
            }
        }
        ChartLayout::Stacked => {
            for line in &class_block {
                writeln!(writer, "{}", line)?;
            }
            writeln!(writer)?;
            for line in &paragraph_block {
                writeln!(writer, "{}", line)?;
            }
        }
    }
    writeln!(writer)?;

    writeln!(writer, "{}", heading("Sentence Analysis"))?;
    write_sentences(writer, &bundle.sentences, color)?;
    writeln!(writer)?;

    let stats = &bundle.stats;
    writeln!(writer, "{}", heading("Additional Statistics"))?;
    writeln!(writer, "Overall Burstiness:             {}", stats.overall_burstiness)?;
    writeln!(writer, "Average Generated Probability:  {}", stats.average_generated_prob)?;
    writeln!(writer, "{}", "-".repeat(48))?;
    writeln!(
        writer,
        "Document Classification:  {} {}",
        stats.classification.icon(),
        stats.classification.label()
    )?;
    writeln!(writer, "Language:                 🌐 {}", stats.language)?;
    writeln!(writer, "Detector Version:         🔍 {}", stats.detector_version)?;
    Ok(())
}

/// Four headline metrics as a label row over a value row.
fn write_summary<W: Write>(writer: &mut W, summary: &SummaryMetrics, color: bool) -> io::Result<()> {
    let metrics = [
        ("AI Probability", summary.ai_probability.as_str()),
        ("Predicted Class", summary.predicted_class.as_str()),
        ("Confidence", summary.confidence_label.as_str()),
        ("Confidence Score", summary.confidence_score.as_str()),
    ];
    let labels: Vec<String> = metrics.iter().map(|(l, _)| format!("{:<20}", l)).collect();
    let values: Vec<String> = metrics.iter().map(|(_, v)| format!("{:<20}", v)).collect();
    writeln!(writer, "{}", paint(labels.concat().trim_end(), DIM, color))?;
    writeln!(writer, "{}", paint(values.concat().trim_end(), BOLD, color))?;
    writeln!(writer)
}

fn bar(value: f64) -> String {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let filled = (v * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn chart_block(chart: &BarChart, heading: &dyn Fn(&str) -> String) -> Vec<String> {
    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(chart.x_title.chars().count());

    let mut lines = vec![heading(&chart.title)];
    lines.push(format!("{:<w$}  {}", chart.x_title, chart.y_title, w = label_width));
    for b in &chart.bars {
        lines.push(format!(
            "{:<w$}  {} {:>7}",
            b.label,
            bar(b.value),
            format!("{:.2}%", b.value * 100.0),
            w = label_width
        ));
    }
    lines
}

fn paragraph_block(bundle: &PresentationBundle, heading: &dyn Fn(&str) -> String) -> Vec<String> {
    let mut lines = vec![heading(&bundle.paragraph_chart.title)];
    lines.push(format!(
        "{:>4} {:>6} {:>6} {:>6}  {}",
        "#", "Start", "End", "Count", "AI Probability"
    ));
    for row in &bundle.paragraphs {
        lines.push(format!(
            "{:>4} {:>6} {:>6} {:>6}  {} {:>7}",
            row.paragraph_number,
            row.start_sentence,
            row.end_sentence,
            row.sentence_count,
            bar(row.ai_probability),
            row.ai_probability_text
        ));
    }
    if bundle.paragraphs.is_empty() {
        lines.push("(no paragraphs)".to_string());
    }
    lines
}

/// Visible width, ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

fn side_by_side(left: &[String], right: &[String], gap: usize) -> Vec<String> {
    let left_width = left.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            let pad = left_width - visible_width(l) + gap;
            format!("{}{}{}", l, " ".repeat(pad), r)
        })
        .collect()
}

fn write_sentences<W: Write>(writer: &mut W, rows: &[SentenceRow], color: bool) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(writer, "(no sentences)");
    }
    writeln!(
        writer,
        "{:>4}  {:>14}  {:>10}  {:<18}  {}",
        "#", "AI Probability", "Perplexity", "Highlighted for AI", "Sentence"
    )?;
    for (i, row) in rows.iter().enumerate() {
        let flag = if row.highlighted { "yes" } else { "no" };
        let line = format!(
            "{:>4}  {:>14}  {:>10}  {:<18}  {}",
            i,
            row.ai_probability_text,
            row.perplexity_text,
            flag,
            row.sentence.replace('\n', " ")
        );
        if row.highlighted {
            writeln!(writer, "{}", paint(&line, RED, color))?;
        } else {
            writeln!(writer, "{}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::output::fixtures::{
        fallback_analysis, partial_fallback_analysis, rendered_analysis,
    };

    fn render(analysis: &Analysis, options: &WriteOptions) -> String {
        let mut buf = Vec::new();
        write(&mut buf, analysis, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report_sections() {
        let out = render(&rendered_analysis(), &WriteOptions::default());
        for needle in [
            "AI Probability",
            "90.00%",
            "Predicted Class",
            "Detailed Results",
            "[!] I am highly confident",
            "Class Probabilities",
            "Paragraph Analysis",
            "Sentence Analysis",
            "12.35",
            "Overall Burstiness:             0.46",
            "🤖 AI Only",
            "🌐 en",
        ] {
            assert!(out.contains(needle), "missing {:?} in:\n{}", needle, out);
        }
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_layouts_differ() {
        let analysis = rendered_analysis();
        let side = render(&analysis, &WriteOptions { layout: ChartLayout::SideBySide, color: false });
        let stacked = render(&analysis, &WriteOptions { layout: ChartLayout::Stacked, color: false });

        let same_line = |out: &str| {
            out.lines()
                .any(|l| l.contains("Class Probabilities") && l.contains("Paragraph Analysis"))
        };
        assert!(same_line(&side));
        assert!(!same_line(&stacked));
    }

    #[test]
    fn test_color_output() {
        let out = render(&rendered_analysis(), &WriteOptions { color: true, ..WriteOptions::default() });
        assert!(out.contains(RED));
        assert!(out.contains(RESET));
    }

    #[test]
    fn test_fallback_prints_raw_json() {
        let out = render(&fallback_analysis(), &WriteOptions::default());
        assert!(out.starts_with(FALLBACK_NOTICE));
        assert!(out.contains("\"predicted_class\": \"ai\""));
    }

    #[test]
    fn test_fallback_keeps_summary_row() {
        let out = render(&partial_fallback_analysis(), &WriteOptions::default());
        let notice_at = out.find(FALLBACK_NOTICE).unwrap();
        let metrics_at = out.find("AI Probability").unwrap();
        assert!(metrics_at < notice_at);
        assert!(out.contains("90.00%"));
        assert!(!out.contains("Detailed Results"));
    }

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(1.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(bar(4.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(-1.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_side_by_side_pads_with_escapes() {
        let left = vec![paint("ab", BOLD, true), "abcd".to_string()];
        let right = vec!["X".to_string()];
        let lines = side_by_side(&left, &right, 2);
        assert_eq!(visible_width(&lines[0]), 7);
        assert_eq!(lines[1], "abcd  ");
    }
}
