//! Report writers for a completed analysis
//!
//! - **text**: terminal report with bar charts drawn from block characters
//! - **html**: self-contained page with the same sections and the sidebar copy
//! - **json**: the serialized `Analysis`
//!
//! `generate` picks the writer from a file extension; `write` takes an
//! explicit `ReportFormat`.

pub mod html;
pub mod json;
pub mod text;

use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use crate::models::Analysis;
use super::render::ChartLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl ReportFormat {
    pub fn from_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "html" | "htm" => ReportFormat::Html,
            "json" => ReportFormat::Json,
            _ => ReportFormat::Text,
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Presentation choices that do not change the analysis itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub layout: ChartLayout,
    pub color: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            color: false,
        }
    }
}

pub fn write<W: Write>(
    writer: &mut W,
    format: ReportFormat,
    analysis: &Analysis,
    options: &WriteOptions,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => text::write(writer, analysis, options),
        ReportFormat::Html => html::write(writer, analysis, options),
        ReportFormat::Json => json::write(writer, analysis),
    }
}

/// Write a report in the format implied by the file extension.
pub fn generate<P: AsRef<Path>>(path: P, analysis: &Analysis, options: &WriteOptions) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path)?;
    // Files never get ANSI escapes.
    let options = WriteOptions { color: false, ..*options };
    write(&mut file, ReportFormat::from_extension(path), analysis, &options)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::Analysis;
    use crate::services::analyze::render_response;
    use crate::services::render::validate::fixtures::sample_document;
    use crate::services::render::RenderOptions;
    use serde_json::{json, Value};

    pub fn rendered_analysis() -> Analysis {
        render_response(&json!({ "documents": [sample_document()] }), &RenderOptions::default())
            .expect("fixture renders")
    }

    pub fn fallback_analysis() -> Analysis {
        let mut doc: Value = sample_document();
        doc.as_object_mut().unwrap().remove("sentences");
        render_response(&json!({ "documents": [doc] }), &RenderOptions::default())
            .expect("fixture renders")
    }

    /// Valid document whose detail section cannot be drawn.
    pub fn partial_fallback_analysis() -> Analysis {
        let mut doc: Value = sample_document();
        doc["paragraphs"] = json!([]);
        render_response(&json!({ "documents": [doc] }), &RenderOptions::default())
            .expect("fixture renders")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::from_extension(Path::new("r.HTML")), ReportFormat::Html);
        assert_eq!(ReportFormat::from_extension(Path::new("r.htm")), ReportFormat::Html);
        assert_eq!(ReportFormat::from_extension(Path::new("r.json")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_extension(Path::new("r.txt")), ReportFormat::Text);
        assert_eq!(ReportFormat::from_extension(Path::new("report")), ReportFormat::Text);
    }

    #[test]
    fn test_generate_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = fixtures::rendered_analysis();
        let options = WriteOptions { color: true, ..WriteOptions::default() };

        let html_path = dir.path().join("report.html");
        generate(&html_path, &analysis, &options).unwrap();
        assert!(std::fs::read_to_string(&html_path).unwrap().starts_with("<!DOCTYPE html>"));

        let json_path = dir.path().join("report.json");
        generate(&json_path, &analysis, &options).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed["outcome"]["kind"], "rendered");

        let text_path = dir.path().join("report.txt");
        generate(&text_path, &analysis, &options).unwrap();
        assert!(!std::fs::read_to_string(&text_path).unwrap().contains('\u{1b}'));
    }
}
