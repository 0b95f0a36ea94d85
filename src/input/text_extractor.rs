//! Text extraction from the supported resume formats

use crate::error::{Result, RankerError};
use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

/// Tokens longer than this are treated as parser garbage (base64 blobs,
/// glued-together glyph runs) and dropped.
pub const MAX_TOKEN_CHARS: usize = 50;

/// Below this many characters the extracted text is suspicious but still returned.
pub const MIN_TEXT_CHARS: usize = 10;

const DOCX_BODY_PART: &str = "word/document.xml";

pub trait TextExtractor {
    /// Turn the raw bytes of one document into plain text. `source` names the
    /// document in error messages.
    fn extract(&self, source: &str, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, source: &str, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed cross-reference tables
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(RankerError::extraction(source, format!("invalid PDF: {}", e))),
            Err(_) => Err(RankerError::extraction(source, "PDF parser aborted on malformed input")),
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, source: &str, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| RankerError::extraction(source, format!("invalid DOCX container: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| RankerError::extraction(source, format!("missing {}: {}", DOCX_BODY_PART, e)))?
            .read_to_string(&mut xml)
            .map_err(|e| RankerError::extraction(source, format!("unreadable {}: {}", DOCX_BODY_PART, e)))?;

        Self::document_xml_to_text(&xml)
            .map_err(|e| RankerError::extraction(source, format!("malformed {}: {}", DOCX_BODY_PART, e)))
    }
}

impl DocxExtractor {
    /// Body paragraphs in order, one per line, followed by every table with
    /// one line per row and cells joined by a space.
    fn document_xml_to_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs = String::new();
        let mut tables = String::new();

        let mut table_depth = 0usize;
        let mut paragraph_depth = 0usize;
        let mut in_text_run = false;
        let mut paragraph = String::new();
        let mut row: Vec<String> = Vec::new();
        let mut cell = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"tbl" => table_depth += 1,
                    b"tr" if table_depth == 1 => row.clear(),
                    b"tc" if table_depth == 1 => cell.clear(),
                    b"p" => {
                        if paragraph_depth == 0 {
                            paragraph.clear();
                        }
                        paragraph_depth += 1;
                    }
                    b"t" => in_text_run = true,
                    _ => {}
                },
                Event::Empty(e) if paragraph_depth > 0 => match e.local_name().as_ref() {
                    b"tab" => paragraph.push(' '),
                    b"br" | b"cr" => paragraph.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text_run && paragraph_depth > 0 => {
                    paragraph.push_str(&t.unescape()?);
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => {
                        paragraph_depth = paragraph_depth.saturating_sub(1);
                        if paragraph_depth == 0 {
                            if table_depth == 0 {
                                paragraphs.push_str(&paragraph);
                                paragraphs.push('\n');
                            } else {
                                if !cell.is_empty() {
                                    cell.push('\n');
                                }
                                cell.push_str(&paragraph);
                            }
                        }
                    }
                    b"tc" if table_depth == 1 => row.push(std::mem::take(&mut cell)),
                    b"tr" if table_depth == 1 => {
                        tables.push_str(&row.join(" "));
                        tables.push('\n');
                    }
                    b"tbl" => table_depth = table_depth.saturating_sub(1),
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        paragraphs.push_str(&tables);
        Ok(paragraphs)
    }
}

/// Legacy binary Word documents are deliberately unsupported.
pub struct DocExtractor;

impl TextExtractor for DocExtractor {
    fn extract(&self, source: &str, _bytes: &[u8]) -> Result<String> {
        Err(RankerError::UnsupportedFormat(format!(
            "'{}' is a legacy .doc file; convert it to .docx and upload it again",
            source
        )))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, _source: &str, bytes: &[u8]) -> Result<String> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            // Latin-1 maps every byte to the code point of the same value
            Err(_) => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Drop over-long tokens and warn about near-empty results.
///
/// Line breaks are kept so that section headings remain detectable; tokens
/// within a line are rejoined with single spaces.
pub fn clean_extracted_text(source: &str, text: &str) -> String {
    let cleaned = text
        .lines()
        .map(|line| {
            line.split_whitespace()
                .filter(|token| token.chars().count() <= MAX_TOKEN_CHARS)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let visible = cleaned.trim().chars().count();
    if visible < MIN_TEXT_CHARS {
        warn!(
            "Very little text extracted from '{}' ({} characters); it will likely score 0",
            source, visible
        );
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file(DOCX_BODY_PART, options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    const DOCX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>5 years</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p><w:r><w:t>SQL</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>3 years</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
    <w:p><w:r><w:t xml:space="preserve">Backend </w:t></w:r><w:r><w:t>engineer &amp; mentor</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_then_tables() {
        let bytes = build_docx(DOCX_XML);
        let text = DocxExtractor.extract("cv.docx", &bytes).unwrap();

        assert_eq!(text, "Jane Smith\nBackend engineer & mentor\nRust 5 years\nSQL 3 years\n");
    }

    #[test]
    fn test_docx_garbage_is_extraction_error() {
        let result = DocxExtractor.extract("broken.docx", b"definitely not a zip file");
        assert!(matches!(result, Err(RankerError::Extraction { .. })));
    }

    #[test]
    fn test_docx_without_body_part() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<styles/>").unwrap();
            writer.finish().unwrap();
        }
        let result = DocxExtractor.extract("empty.docx", &buffer.into_inner());
        assert!(matches!(result, Err(RankerError::Extraction { .. })));
    }

    #[test]
    fn test_pdf_garbage_is_extraction_error() {
        let result = PdfExtractor.extract("fake.pdf", b"plain text pretending to be a pdf");
        assert!(matches!(result, Err(RankerError::Extraction { .. })));
    }

    #[test]
    fn test_doc_is_always_unsupported() {
        let result = DocExtractor.extract("old.doc", b"anything at all");
        match result {
            Err(RankerError::UnsupportedFormat(message)) => assert!(message.contains(".docx")),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_latin1_fallback() {
        let text = PlainTextExtractor.extract("cv.txt", b"Caf\xe9 manager").unwrap();
        assert_eq!(text, "Café manager");

        let text = PlainTextExtractor.extract("cv.txt", "Café".as_bytes()).unwrap();
        assert_eq!(text, "Café");
    }

    #[test]
    fn test_cleanup_drops_long_tokens() {
        let blob = "A".repeat(MAX_TOKEN_CHARS + 1);
        let edge = "b".repeat(MAX_TOKEN_CHARS);
        let text = format!("Skills:  Rust {}\n  {} SQL", blob, edge);

        let cleaned = clean_extracted_text("cv.txt", &text);
        assert_eq!(cleaned, format!("Skills: Rust\n{} SQL", edge));
    }

    #[test]
    fn test_cleanup_keeps_near_empty_text() {
        assert_eq!(clean_extracted_text("tiny.txt", " hi "), "hi");
        assert_eq!(clean_extracted_text("empty.txt", ""), "");
    }
}
