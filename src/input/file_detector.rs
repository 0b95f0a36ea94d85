//! File type detection

use crate::error::{Result, RankerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl FileType {
    /// Dispatch is by lower-cased extension only; content is never sniffed.
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.trim().trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "pdf" => Ok(FileType::Pdf),
            "docx" => Ok(FileType::Docx),
            "doc" => Ok(FileType::Doc),
            "txt" => Ok(FileType::Txt),
            _ => Err(RankerError::UnsupportedFormat(format!(
                "'.{}' files are not supported. Supported: pdf, docx, doc, txt",
                ext
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                RankerError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Doc => "doc",
            FileType::Txt => "txt",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
