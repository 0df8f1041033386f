use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported document type for '{0}' (expected .pdf or .txt)")]
    UnsupportedDocument(String),

    #[error("failed to read PDF '{file}': {message}")]
    Pdf { file: String, message: String },

    #[error("'{0}' is not valid UTF-8 text")]
    InvalidText(String),

    #[error("no text could be extracted from '{0}'")]
    EmptyDocument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(DocumentKind::Pdf)
        } else if ext.eq_ignore_ascii_case("txt") {
            Some(DocumentKind::Text)
        } else {
            None
        }
    }
}

/// Faculty identifier for a CV: the file name without its extension.
pub fn faculty_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Extracts the text of an uploaded CV. PDF parsing is CPU-bound; call this
/// from `spawn_blocking`.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let kind = DocumentKind::from_file_name(file_name)
        .ok_or_else(|| IngestError::UnsupportedDocument(file_name.to_string()))?;

    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf {
                file: file_name.to_string(),
                message: e.to_string(),
            })?
        }
        DocumentKind::Text => String::from_utf8(bytes.to_vec())
            .map_err(|_| IngestError::InvalidText(file_name.to_string()))?,
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyDocument(file_name.to_string()));
    }

    Ok(text)
}
