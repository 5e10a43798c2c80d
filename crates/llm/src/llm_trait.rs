use async_trait::async_trait;
use tubesum_common::Result;

use crate::types::GenerateRequest;

/// Common trait for LLM clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate text from a prompt
    ///
    /// An empty string means the call succeeded without producing text.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
