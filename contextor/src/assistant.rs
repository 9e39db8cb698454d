//! Document-free tasks: prompt in, completion out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api_types::{NdaRequest, Task, TaskAnswer, UsedChunk};
use crate::error::ContextorError;
use crate::llm::ChatBackend;
use crate::prompt;

/// Chat backend plus the system instruction sent with every prompt.
///
/// Cheap to clone and holds no document state, so callers can run NDA drafts
/// and clause explanations without touching a [`crate::ContractSession`].
#[derive(Clone)]
pub struct Assistant {
    chat: Arc<dyn ChatBackend>,
    system_prompt: String,
}

impl Assistant {
    pub fn new(chat: Arc<dyn ChatBackend>, system_prompt: impl Into<String>) -> Self {
        Self {
            chat,
            system_prompt: system_prompt.into(),
        }
    }

    /// # Errors
    /// [`ContextorError::MissingField`] naming the first blank field; the
    /// backend is not called in that case.
    pub async fn draft_nda(&self, req: &NdaRequest) -> Result<TaskAnswer, ContextorError> {
        let user = prompt::nda_prompt(req)?;
        self.complete(Task::DraftNda, &user, Vec::new()).await
    }

    pub async fn explain_clause(&self, clause: &str) -> Result<TaskAnswer, ContextorError> {
        let user = prompt::clause_prompt(clause)?;
        self.complete(Task::ExplainClause, &user, Vec::new()).await
    }

    pub(crate) async fn complete(
        &self,
        task: Task,
        user: &str,
        context: Vec<UsedChunk>,
    ) -> Result<TaskAnswer, ContextorError> {
        debug!(?task, prompt_len = user.len(), context = context.len(), "sending prompt");
        let answer = self
            .chat
            .chat(&self.system_prompt, user)
            .await
            .map_err(|e| {
                warn!(?task, kind = e.kind(), error = %e, "completion failed");
                ContextorError::Completion(e)
            })?;
        info!(?task, answer_len = answer.len(), "task completed");
        Ok(TaskAnswer {
            task,
            answer,
            context,
        })
    }
}
