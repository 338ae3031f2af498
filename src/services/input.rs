// Input Service
// Reads the text to analyze from files or stdin and normalizes whitespace

use regex::Regex;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("failed to extract text from DOCX: {0}")]
    Docx(String),
    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),
    #[error("{0} is not valid UTF-8 text")]
    NotUtf8(PathBuf),
}

fn odd_spaces() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}\u{2007}\u{202F}]").expect("static regex"))
}

/// Line endings to `\n`, exotic spaces to plain spaces, outer whitespace
/// trimmed. Words and punctuation are left as typed.
pub fn normalize_input(text: &str) -> String {
    let s = text.replace("\r\n", "\n").replace('\r', "\n");
    let s = odd_spaces().replace_all(&s, " ");
    s.trim().to_string()
}

/// Load text from a file; `.docx` and `.pdf` are extracted, anything else is
/// read as UTF-8.
pub fn load_text(path: &Path) -> Result<String, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match ext.as_str() {
        "docx" => extract_docx(&bytes)?,
        "pdf" => pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| InputError::Pdf(format!("{:?}", e)))?,
        _ => String::from_utf8(bytes).map_err(|_| InputError::NotUtf8(path.to_path_buf()))?,
    };

    info!(
        path = %path.display(),
        kind = if ext.is_empty() { "text" } else { ext.as_str() },
        chars = text.chars().count(),
        "input.loaded"
    );
    Ok(normalize_input(&text))
}

pub fn read_stdin() -> Result<String, InputError> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(InputError::Stdin)?;
    Ok(normalize_input(&buf))
}

fn extract_docx(bytes: &[u8]) -> Result<String, InputError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| InputError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for p_child in &paragraph.children {
                if let ParagraphChild::Run(run) = p_child {
                    for r_child in &run.children {
                        match r_child {
                            RunChild::Text(t) => line.push_str(&t.text),
                            RunChild::Tab(_) => line.push('\t'),
                            RunChild::Break(_) => line.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            paragraphs.push(line);
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_input() {
        assert_eq!(normalize_input("  a\r\nb\rc  "), "a\nb\nc");
        assert_eq!(normalize_input("x\u{00A0}y\u{3000}z"), "x y z");
        assert_eq!(normalize_input("“Quotes” stay."), "“Quotes” stay.");
        assert_eq!(normalize_input("   "), "");
    }

    #[test]
    fn test_load_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.txt");
        std::fs::write(&path, "Line one.\r\nLine two.\n").unwrap();
        assert_eq!(load_text(&path).unwrap(), "Line one.\nLine two.");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_text(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(load_text(&path), Err(InputError::NotUtf8(_))));
    }

    #[test]
    fn test_load_bad_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(load_text(&path), Err(InputError::Docx(_))));
    }

    #[test]
    fn test_docx_roundtrip() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph.")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Second paragraph.")))
            .build()
            .pack(file)
            .unwrap();

        assert_eq!(load_text(&path).unwrap(), "First paragraph.\nSecond paragraph.");
    }
}
