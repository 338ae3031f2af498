//! HTML report: one self-contained page, CSS-only bar charts, no scripts

use std::io::{self, Write};

use crate::models::{
    Analysis, BarChart, PresentationBundle, RawFallback, RenderOutcome, SummaryMetrics, Tone,
};
use crate::services::render::sidebar::{
    HOW_IT_WORKS, HOW_IT_WORKS_TITLE, PERPLEXITY_FORMULA, PERPLEXITY_INTERPRETATION,
    PERPLEXITY_INTRO, PERPLEXITY_TERMS, PERPLEXITY_TITLE,
};
use crate::services::render::{ChartLayout, FALLBACK_NOTICE};
use super::WriteOptions;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn write<W: Write>(writer: &mut W, analysis: &Analysis, options: &WriteOptions) -> io::Result<()> {
    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Detection Report</title>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --ok: #3fb950;
            --bad: #f85149;
            --accent: #58a6ff;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .page {{ display: grid; grid-template-columns: 320px 1fr; min-height: 100vh; }}
        .sidebar {{ background: var(--card); border-right: 1px solid var(--border); padding: 1.5rem; font-size: 0.875rem; }}
        .sidebar h2 {{ font-size: 1.1rem; margin: 1rem 0 0.5rem; }}
        .sidebar p, .sidebar li {{ color: var(--dim); margin-bottom: 0.5rem; white-space: pre-line; }}
        .sidebar code {{ color: var(--text); }}
        .container {{ max-width: 1400px; padding: 2rem; }}
        h1 {{ font-size: 2rem; margin-bottom: 1.5rem; }}
        h3 {{ margin: 1.5rem 0 0.75rem; }}
        .stats {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; margin-bottom: 1.5rem; }}
        .stat {{ background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 1.25rem; }}
        .stat-label {{ color: var(--dim); font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.05em; }}
        .stat-value {{ font-size: 2rem; font-weight: 700; }}
        .message {{ border-radius: 8px; padding: 0.75rem 1rem; margin-bottom: 0.5rem; }}
        .message.positive {{ background: rgba(63, 185, 80, 0.15); border: 1px solid var(--ok); }}
        .message.negative {{ background: rgba(248, 81, 73, 0.15); border: 1px solid var(--bad); }}
        .charts {{ display: grid; gap: 1.5rem; }}
        .charts.side-by-side {{ grid-template-columns: 1fr 1fr; }}
        .charts.stacked {{ grid-template-columns: 1fr; }}
        .card {{ background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 1.25rem; }}
        .bar-row {{ display: grid; grid-template-columns: 6rem 1fr 5rem; gap: 0.5rem; align-items: center; margin: 0.25rem 0; }}
        .bar-track {{ background: var(--bg); border-radius: 4px; height: 18px; overflow: hidden; }}
        .bar-fill {{ height: 100%; }}
        .axis {{ color: var(--dim); font-size: 0.75rem; }}
        table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
        th, td {{ text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid var(--border); }}
        th {{ color: var(--dim); font-weight: 600; }}
        tr.highlighted td {{ background: rgba(248, 81, 73, 0.12); }}
        .meta {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }}
        pre {{ background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; overflow-x: auto; }}
        .error {{ color: var(--bad); margin-bottom: 1rem; }}
    </style>
</head>
<body>
<div class="page">
"#)?;

    write_sidebar(writer)?;

    writeln!(writer, r#"<main class="container">"#)?;
    writeln!(writer, "<h1>Accurate AI Detection</h1>")?;

    match &analysis.outcome {
        RenderOutcome::Rendered(bundle) => write_bundle(writer, bundle, options.layout)?,
        RenderOutcome::Fallback(fallback) => write_fallback(writer, fallback)?,
    }

    writeln!(
        writer,
        r#"<p class="axis">Request {} &middot; {}</p>"#,
        escape(&analysis.request_id),
        escape(&analysis.created_at)
    )?;
    writeln!(writer, "</main>\n</div>\n</body>\n</html>")
}

fn write_sidebar<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, r#"<aside class="sidebar">"#)?;
    writeln!(writer, "<h2>{}</h2>", escape(HOW_IT_WORKS_TITLE))?;
    writeln!(writer, "<p>{}</p>", escape(HOW_IT_WORKS))?;
    writeln!(writer, "<h2>{}</h2>", escape(PERPLEXITY_TITLE))?;
    writeln!(writer, "<p>{}</p>", escape(PERPLEXITY_INTRO))?;
    writeln!(writer, "<p><strong>Formula:</strong><br><code>{}</code></p>", escape(PERPLEXITY_FORMULA))?;
    writeln!(writer, "<p>Where:</p><ul>")?;
    for term in PERPLEXITY_TERMS {
        writeln!(writer, "<li>{}</li>", escape(term))?;
    }
    writeln!(writer, "</ul><p><strong>Interpretation:</strong></p><ul>")?;
    for line in PERPLEXITY_INTERPRETATION {
        writeln!(writer, "<li>{}</li>", escape(line))?;
    }
    writeln!(writer, "</ul>\n</aside>")
}

fn write_fallback<W: Write>(writer: &mut W, fallback: &RawFallback) -> io::Result<()> {
    if let Some(summary) = &fallback.summary {
        write_summary(writer, summary)?;
    }
    writeln!(writer, r#"<p class="error">{}</p>"#, escape(FALLBACK_NOTICE))?;
    writeln!(writer, r#"<p class="axis">{}</p>"#, escape(&fallback.reason))?;
    let raw = serde_json::to_string_pretty(&fallback.raw)?;
    writeln!(writer, "<pre>{}</pre>", escape(&raw))
}

fn write_summary<W: Write>(writer: &mut W, summary: &SummaryMetrics) -> io::Result<()> {
    writeln!(writer, r#"<div class="stats">"#)?;
    for (label, value) in [
        ("AI Probability", &summary.ai_probability),
        ("Predicted Class", &summary.predicted_class),
        ("Confidence", &summary.confidence_label),
        ("Confidence Score", &summary.confidence_score),
    ] {
        writeln!(
            writer,
            r#"<div class="stat"><div class="stat-label">{}</div><div class="stat-value">{}</div></div>"#,
            label,
            escape(value)
        )?;
    }
    writeln!(writer, "</div>")
}

fn write_bundle<W: Write>(writer: &mut W, bundle: &PresentationBundle, layout: ChartLayout) -> io::Result<()> {
    write_summary(writer, &bundle.summary)?;

    writeln!(writer, "<h3>Detailed Results</h3>")?;
    for message in &bundle.messages {
        let class = match message.tone {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
        };
        writeln!(writer, r#"<div class="message {}">{}</div>"#, class, escape(&message.text))?;
    }

    let layout_class = match layout {
        ChartLayout::SideBySide => "side-by-side",
        ChartLayout::Stacked => "stacked",
    };
    writeln!(writer, r#"<div class="charts {}">"#, layout_class)?;
    write_chart(writer, &bundle.class_chart)?;
    write_chart(writer, &bundle.paragraph_chart)?;
    writeln!(writer, "</div>")?;

    writeln!(writer, "<h3>Paragraph Analysis</h3>")?;
    writeln!(
        writer,
        "<table><thead><tr><th>Paragraph</th><th>Start Sentence</th><th>End Sentence Index</th><th>Sentence Count</th><th>AI Probability</th></tr></thead><tbody>"
    )?;
    for row in &bundle.paragraphs {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.paragraph_number,
            row.start_sentence,
            row.end_sentence,
            row.sentence_count,
            escape(&row.ai_probability_text)
        )?;
    }
    writeln!(writer, "</tbody></table>")?;

    writeln!(writer, "<h3>Sentence Analysis</h3>")?;
    writeln!(
        writer,
        "<table><thead><tr><th>Sentence</th><th>AI Probability</th><th>Perplexity</th><th>Highlighted for AI</th></tr></thead><tbody>"
    )?;
    for row in &bundle.sentences {
        writeln!(
            writer,
            r#"<tr{}><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            if row.highlighted { r#" class="highlighted""# } else { "" },
            escape(&row.sentence),
            escape(&row.ai_probability_text),
            escape(&row.perplexity_text),
            row.highlighted
        )?;
    }
    writeln!(writer, "</tbody></table>")?;

    let stats = &bundle.stats;
    writeln!(writer, "<h3>Additional Statistics</h3>")?;
    writeln!(writer, r#"<div class="stats" style="grid-template-columns: 1fr 1fr;">"#)?;
    writeln!(
        writer,
        r#"<div class="stat"><div class="stat-label">Overall Burstiness</div><div class="stat-value">{}</div></div>"#,
        escape(&stats.overall_burstiness)
    )?;
    writeln!(
        writer,
        r#"<div class="stat"><div class="stat-label">Average Generated Probability</div><div class="stat-value">{}</div></div>"#,
        escape(&stats.average_generated_prob)
    )?;
    writeln!(writer, "</div>\n<hr style=\"border-color: var(--border); margin: 1rem 0;\">")?;
    writeln!(writer, r#"<div class="meta">"#)?;
    writeln!(
        writer,
        "<div><strong>Document Classification</strong><br>{} {}</div>",
        stats.classification.icon(),
        stats.classification.label()
    )?;
    writeln!(writer, "<div><strong>Language</strong><br>🌐 {}</div>", escape(&stats.language))?;
    writeln!(
        writer,
        "<div><strong>Detector Version</strong><br>🔍 {}</div>",
        escape(&stats.detector_version)
    )?;
    writeln!(writer, "</div>")
}

fn write_chart<W: Write>(writer: &mut W, chart: &BarChart) -> io::Result<()> {
    writeln!(writer, r#"<div class="card"><h3>{}</h3>"#, escape(&chart.title))?;
    writeln!(
        writer,
        r#"<div class="axis">{} &rarr; {}</div>"#,
        escape(&chart.y_title),
        escape(&chart.x_title)
    )?;
    for b in &chart.bars {
        let pct = if b.value.is_nan() { 0.0 } else { b.value.clamp(0.0, 1.0) * 100.0 };
        let text = b
            .text
            .clone()
            .unwrap_or_else(|| format!("{:.2}%", b.value * 100.0));
        writeln!(
            writer,
            r#"<div class="bar-row"><span>{}</span><div class="bar-track"><div class="bar-fill" style="width: {:.1}%; background: {};"></div></div><span>{}</span></div>"#,
            escape(&b.label),
            pct,
            escape(&b.color),
            escape(&text)
        )?;
    }
    writeln!(writer, "</div>")
}
