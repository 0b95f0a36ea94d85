//! Input manager routing documents to the right extractor

use crate::config::InputConfig;
use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    clean_extracted_text, DocExtractor, DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::Document;
use log::debug;
use std::path::Path;

/// Stateless; cheap to clone into worker tasks.
#[derive(Debug, Clone)]
pub struct InputManager {
    allowed_extensions: Vec<String>,
    max_file_size_bytes: u64,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&crate::config::Config::default().input)
    }
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            allowed_extensions: config.allowed_extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_file_size_bytes: config.max_file_size_bytes,
        }
    }

    /// Extract and clean the text of one document.
    pub fn extract(&self, document: &Document) -> Result<String> {
        let file_type = document.file_type()?;
        debug!("Extracting {} text from: {}", file_type, document.identifier);

        let raw = match file_type {
            FileType::Pdf => PdfExtractor.extract(&document.identifier, &document.bytes)?,
            FileType::Docx => DocxExtractor.extract(&document.identifier, &document.bytes)?,
            FileType::Doc => DocExtractor.extract(&document.identifier, &document.bytes)?,
            FileType::Txt => PlainTextExtractor.extract(&document.identifier, &document.bytes)?,
        };

        Ok(clean_extracted_text(&document.identifier, &raw))
    }

    /// Read a file from disk, enforcing the allow-list and size bound before
    /// the bytes reach the pipeline.
    pub fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        self.check_extension(path)?;

        let size = std::fs::metadata(path)?.len();
        if size > self.max_file_size_bytes {
            return Err(RankerError::InvalidInput(format!(
                "{} is {} bytes, above the {} byte limit",
                path.display(),
                size,
                self.max_file_size_bytes
            )));
        }

        Document::from_path(path)
    }

    pub fn extract_path(&self, path: &Path) -> Result<String> {
        let document = self.load_document(path)?;
        self.extract(&document)
    }

    fn check_extension(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| RankerError::InvalidInput(format!("File has no extension: {}", path.display())))?
            .to_lowercase();

        if self.allowed_extensions.contains(&extension) {
            Ok(())
        } else {
            Err(RankerError::InvalidInput(format!(
                "Unsupported file extension: .{}. Allowed: {}",
                extension,
                self.allowed_extensions.join(", ")
            )))
        }
    }
}
