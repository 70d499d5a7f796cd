// src/analysis/extract.rs
//! Resume text extraction for PDF and Word documents

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use thiserror::Error;

use crate::utils::get_file_extension;

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid PDF: {0}")]
    Pdf(String),
    #[error("invalid Word document: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the document kind from a client-supplied file name.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match get_file_extension(file_name)?.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }

    /// Extract plain text. CPU bound; run it off the async executor.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        match self {
            DocumentKind::Pdf => extract_pdf_text(bytes),
            DocumentKind::Docx => extract_docx_text(bytes),
        }
    }
}

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Paragraph texts of the document body, one line per paragraph.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractError::Docx(format!("{}: {}", DOCX_BODY_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    paragraphs_from_document_xml(&xml).map(|paragraphs| paragraphs.join("\n"))
}

fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" if in_paragraph => current.push('\t'),
                b"w:br" | b"w:cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    in_paragraph = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Docx(format!(
                    "malformed XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Minimal .docx archive with one paragraph per entry.
    fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}</w:body></w:document>",
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCX_BODY_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_document_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("cv.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("CV.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("cv.doc"), None);
        assert_eq!(DocumentKind::from_file_name("resume"), None);
    }

    #[test]
    fn test_extract_docx_paragraphs() {
        let bytes = docx_with_paragraphs(&["Senior Python developer", "Flask &amp; SQL"]);
        let text = extract_docx_text(&bytes).unwrap();
        assert_eq!(text, "Senior Python developer\nFlask & SQL");
    }

    #[test]
    fn test_extract_docx_joins_runs_and_keeps_empty_paragraphs() {
        let xml = "<w:document xmlns:w=\"urn:w\"><w:body>\
                   <w:p><w:r><w:t>Machine </w:t></w:r><w:r><w:t>learning</w:t></w:r></w:p>\
                   <w:p/>\
                   <w:p><w:r><w:t>AWS</w:t><w:tab/><w:t>Docker</w:t></w:r></w:p>\
                   </w:body></w:document>";
        let paragraphs = paragraphs_from_document_xml(xml).unwrap();
        assert_eq!(paragraphs, vec!["Machine learning", "", "AWS\tDocker"]);
    }

    #[test]
    fn test_extract_docx_rejects_non_zip() {
        assert!(matches!(
            extract_docx_text(b"not a zip archive"),
            Err(ExtractError::Docx(_))
        ));
    }

    #[test]
    fn test_extract_pdf_rejects_garbage() {
        assert!(matches!(
            extract_pdf_text(b"definitely not a pdf"),
            Err(ExtractError::Pdf(_))
        ));
    }
}
