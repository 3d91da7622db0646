use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for the external language-model actor.
///
/// The companion only needs "text in, text out", so a remote API, a local
/// server or a test double can sit behind this trait.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete reply to `message`.
    ///
    /// Any error makes the caller fall back to the rule-based brain.
    async fn generate_reply(&self, message: String, system_prompt: Option<String>) -> Result<String, AppError>;
}
