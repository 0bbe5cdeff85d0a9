/// Turns an uploaded document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Could not extract text from PDF: {0}")]
    Pdf(String),
}

/// PDF text extraction backed by `pdf-extract`. CPU bound; call it off the runtime.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
        Ok(clean_text(&raw))
    }
}

/// Strip trailing whitespace from each line and the text as a whole.
/// Blank lines stay so paragraph boundaries survive.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
