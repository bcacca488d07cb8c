use async_trait::async_trait;

use crate::domain::{ChatMessage, UpstreamError};

/// Sends a role-tagged prompt to a chat-completion service.
///
/// Implementors own transport, serialization and vendor-specific details.
/// `Ok(None)` means the service answered successfully but produced no text.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, UpstreamError>;
}
