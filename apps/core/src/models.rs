use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

use crate::brain::{ContextAnalysis, EmotionAnalysis, ReplyKind};

/// Longest chat message accepted from a client, in characters.
pub const MAX_MESSAGE_CHARS: u64 = 2000;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// The external generative-text service
    Api,
    /// The rule-based brain
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Api => "api",
            ReplySource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sender of a stored chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: i64,
    /// Subject of the bearer token that sent or received the message.
    pub user_id: String,
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
    /// "api" or "fallback" for assistant messages, `None` for user messages.
    pub source: Option<String>,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
}

/// Body of `POST /api/ai-chat`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// Classifier output attached to fallback replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyAnalysis {
    pub kind: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextAnalysis>,
}

/// Reply returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ReplyAnalysis>,
}
