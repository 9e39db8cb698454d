//! Chat seam between the task pipeline and the completion client.

use std::{future::Future, pin::Pin};

use ai_llm_service::{AiLlmError, LlmServiceProfiles};

/// Boxed future returned by [`ChatBackend::chat`].
pub type ChatFuture<'a> = Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;

/// Anything that turns a `(system, user)` prompt pair into a completion.
///
/// Implemented by [`LlmServiceProfiles`]; tests plug in a fake.
pub trait ChatBackend: Send + Sync {
    fn chat<'a>(&'a self, system: &'a str, user: &'a str) -> ChatFuture<'a>;
}

impl ChatBackend for LlmServiceProfiles {
    fn chat<'a>(&'a self, system: &'a str, user: &'a str) -> ChatFuture<'a> {
        Box::pin(self.complete(user, Some(system)))
    }
}
