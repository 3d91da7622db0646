use crate::error::AppError;
use crate::models::ChatReply;
use tokio::sync::oneshot;

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request to generate a complete reply.
    GenerateReply {
        message: String,
        system_prompt: Option<String>,
        /// A channel to send the final `String` result back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
}

/// Messages that can be sent to the `CompanionActor`.
#[derive(Debug)]
pub enum CompanionMessage {
    /// A chat message from an authenticated user.
    ProcessUserMessage {
        user_id: String,
        content: String,
        /// A channel to send the reply (and its provenance) back.
        responder: oneshot::Sender<Result<ChatReply, AppError>>,
    },
    /// A command to stop the companion loop.
    Shutdown,
}
