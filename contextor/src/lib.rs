//! Legal task pipeline: prompts, the chat seam, and the per-document session.
//!
//! Public API: [`ContractSession`] and [`Assistant`]. Stateless tasks (NDA
//! drafting, clause explanation) go straight from prompt to completion through
//! an [`Assistant`]. Document tasks read the uploaded contract; questions
//! additionally retrieve context from a vector index that the session builds
//! on first use.
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use contextor::{ContextorConfig, ContractSession};
//! # use rag_base::HashingEmbedder;
//! # async fn run(chat: Arc<dyn contextor::llm::ChatBackend>, pdf: Vec<u8>) -> Result<(), contextor::ContextorError> {
//! let mut session = ContractSession::new(
//!     ContextorConfig::default(),
//!     chat,
//!     Arc::new(HashingEmbedder::new(384)?),
//! );
//! session.load_pdf(&pdf)?;
//! let qa = session.ask("How long is the term?", None).await?;
//! println!("{}", qa.answer);
//! # Ok(()) }
//! ```

mod assistant;
pub mod cfg;
mod error;
pub mod llm;
pub mod prompt;
mod session;

mod api_types;

pub use api_types::{DocumentInfo, NdaRequest, Task, TaskAnswer, UsedChunk};
pub use assistant::Assistant;
pub use cfg::ContextorConfig;
pub use error::ContextorError;
pub use llm::ChatBackend;
pub use session::ContractSession;
