//! PDF text extraction on top of `lopdf`.
//!
//! Pages are read in document order. A page that fails to decode or carries
//! no text contributes an empty string; only a byte stream that cannot be
//! opened as a PDF at all is an error.

use lopdf::Document;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::rag_base_error::RagBaseError;

/// Plain text of a document, one entry per page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pages: Vec<String>,
}

impl ExtractedText {
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages joined with `"\n"`.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    /// Character count of [`ExtractedText::text`].
    pub fn char_count(&self) -> usize {
        let seps = self.pages.len().saturating_sub(1);
        self.pages.iter().map(|p| p.chars().count()).sum::<usize>() + seps
    }

    /// True when no page carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}

impl From<Vec<String>> for ExtractedText {
    fn from(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

/// Extract the text of every page of a PDF held in memory.
///
/// # Errors
/// [`RagBaseError::DocumentUnreadable`] if `bytes` is not a parseable PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<ExtractedText, RagBaseError> {
    let doc = Document::load_mem(bytes).map_err(|e| {
        warn!(bytes = bytes.len(), error = %e, "pdf could not be opened");
        RagBaseError::DocumentUnreadable(e.to_string())
    })?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());

    for number in page_numbers {
        let text = match doc.extract_text(&[number]) {
            Ok(t) => t.trim_end().to_string(),
            Err(e) => {
                debug!(page = number, error = %e, "page text not extractable, using empty text");
                String::new()
            }
        };
        pages.push(text);
    }

    let out = ExtractedText::from(pages);
    info!(pages = out.page_count(), chars = out.char_count(), "pdf text extracted");
    Ok(out)
}
