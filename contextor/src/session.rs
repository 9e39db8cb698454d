//! One user's working state: the current document and its vector index.
//!
//! The index is built lazily on the first question and dropped whenever the
//! document is replaced or the session is reset, so it never outlives the
//! text it was built from.

use std::sync::Arc;

use rag_base::{
    EmbeddingsProvider, ExtractedText, RagBaseError, VectorIndex, extract::extract_pdf_text,
    index_document, search::retrieve,
};
use tracing::{debug, info, warn};

use crate::api_types::{DocumentInfo, NdaRequest, Task, TaskAnswer, UsedChunk};
use crate::assistant::Assistant;
use crate::cfg::ContextorConfig;
use crate::error::ContextorError;
use crate::llm::ChatBackend;
use crate::prompt;

struct LoadedDocument {
    text: ExtractedText,
    index: Option<VectorIndex>,
}

pub struct ContractSession {
    cfg: ContextorConfig,
    assistant: Assistant,
    embedder: Arc<dyn EmbeddingsProvider>,
    document: Option<LoadedDocument>,
}

impl ContractSession {
    pub fn new(
        cfg: ContextorConfig,
        chat: Arc<dyn ChatBackend>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Self {
        Self {
            assistant: Assistant::new(chat, cfg.system_prompt.clone()),
            cfg,
            embedder,
            document: None,
        }
    }

    /// Replace the current document with the text of a PDF.
    ///
    /// # Errors
    /// [`RagBaseError::DocumentUnreadable`] if `bytes` is not a PDF; the
    /// previous document is kept in that case.
    pub fn load_pdf(&mut self, bytes: &[u8]) -> Result<DocumentInfo, ContextorError> {
        let text = extract_pdf_text(bytes)?;
        Ok(self.load_text(text))
    }

    /// Replace the current document with already extracted text.
    pub fn load_text(&mut self, text: ExtractedText) -> DocumentInfo {
        if self.document.is_some() {
            debug!("replacing current document; index dropped");
        }
        if text.is_blank() {
            warn!(pages = text.page_count(), "document has no extractable text");
        }
        self.document = Some(LoadedDocument { text, index: None });
        self.document_info().unwrap_or(DocumentInfo {
            pages: 0,
            chars: 0,
            indexed_chunks: None,
        })
    }

    /// Forget the document and its index.
    pub fn reset(&mut self) {
        self.document = None;
        info!("session reset");
    }

    pub fn document_info(&self) -> Option<DocumentInfo> {
        self.document.as_ref().map(|d| DocumentInfo {
            pages: d.text.page_count(),
            chars: d.text.char_count(),
            indexed_chunks: d.index.as_ref().map(VectorIndex::len),
        })
    }

    /// The document-free half of the session.
    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub async fn draft_nda(&self, req: &NdaRequest) -> Result<TaskAnswer, ContextorError> {
        self.assistant.draft_nda(req).await
    }

    pub async fn explain_clause(&self, clause: &str) -> Result<TaskAnswer, ContextorError> {
        self.assistant.explain_clause(clause).await
    }

    /// Summarize the beginning of the current document.
    ///
    /// # Errors
    /// - [`ContextorError::NoDocument`] without a document
    /// - [`RagBaseError::EmptyDocument`] if the document has no text
    pub async fn summarize(&self) -> Result<TaskAnswer, ContextorError> {
        let doc = self.document.as_ref().ok_or(ContextorError::NoDocument)?;
        if doc.text.is_blank() {
            return Err(RagBaseError::EmptyDocument.into());
        }
        let user = prompt::summary_prompt(&doc.text.text());
        self.assistant.complete(Task::Summarize, &user, Vec::new()).await
    }

    /// Answer a question from the top `top_k` chunks of the current document
    /// (`RAG_TOP_K` when `None`). Builds the index on first use.
    ///
    /// # Errors
    /// - [`ContextorError::MissingField`] for a blank question
    /// - [`ContextorError::InvalidField`] for `top_k == Some(0)`, before any indexing
    /// - [`ContextorError::NoDocument`] without a document
    /// - [`RagBaseError::EmptyDocument`] if the document has no text
    /// - embedding, retrieval and completion errors
    pub async fn ask(
        &mut self,
        question: &str,
        top_k: Option<usize>,
    ) -> Result<TaskAnswer, ContextorError> {
        if question.trim().is_empty() {
            return Err(ContextorError::MissingField("question"));
        }
        if top_k == Some(0) {
            return Err(ContextorError::InvalidField {
                field: "top_k",
                reason: "must be greater than zero",
            });
        }
        let rag = &self.cfg.rag;
        let doc = self.document.as_mut().ok_or(ContextorError::NoDocument)?;

        if doc.index.is_none() {
            let (index, stats) =
                index_document(&doc.text.text(), rag, self.embedder.as_ref()).await?;
            debug!(indexed = stats.indexed, model = %stats.model, "document indexed on first question");
            doc.index = Some(index);
        }

        let k = top_k.unwrap_or(rag.search.top_k);
        let hits = retrieve(
            doc.index.as_ref(),
            question,
            self.embedder.as_ref(),
            k,
            rag.search.min_score,
        )
        .await?;

        let user = prompt::qna_prompt(
            question,
            &hits.iter().map(|h| h.text.as_str()).collect::<Vec<_>>(),
        )?;
        let context = hits.into_iter().map(UsedChunk::from).collect();
        self.assistant.complete(Task::Ask, &user, context).await
    }
}
