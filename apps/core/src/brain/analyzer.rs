//! Companion Brain - rule-based reply engine.
//!
//! Runs the greeting short-circuit, then the emotion and context classifiers,
//! then the response table. Used whenever the external language model is
//! unavailable, so it never fails and never blocks.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::context::{classify_context, ContextAnalysis};
use super::emotion::{classify_emotion, EmotionAnalysis};
use super::random::{RandomSource, ThreadRandom};
use super::responder::{is_greeting, ResponseTable, GREETING_REPLY};

/// Which branch of the pipeline produced a fallback reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Fixed greeting; classifiers were skipped
    Greeting,
    /// Deterministic entry from the response table
    Table,
    /// Random pick from the generic pool
    Generic,
}

/// Reply produced by the brain, with the analyses that led to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackReply {
    pub text: String,
    pub kind: ReplyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextAnalysis>,
}

/// Main brain entry point.
#[derive(Clone)]
pub struct CompanionBrain {
    table: ResponseTable,
    rng: Arc<dyn RandomSource>,
}

impl Default for CompanionBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanionBrain {
    /// Built-in tables, thread-local RNG
    pub fn new() -> Self {
        Self::with_parts(ResponseTable::builtin(), Arc::new(ThreadRandom))
    }

    pub fn with_random(rng: Arc<dyn RandomSource>) -> Self {
        Self::with_parts(ResponseTable::builtin(), rng)
    }

    pub fn with_parts(table: ResponseTable, rng: Arc<dyn RandomSource>) -> Self {
        Self { table, rng }
    }

    pub fn is_greeting(&self, text: &str) -> bool {
        is_greeting(text)
    }

    /// Classify without selecting a reply.
    pub fn analyze(&self, text: &str) -> (EmotionAnalysis, ContextAnalysis) {
        (classify_emotion(text), classify_context(text))
    }

    /// Produce a reply for `text`. Always returns a non-empty string.
    pub fn reply(&self, text: &str) -> FallbackReply {
        if self.is_greeting(text) {
            return FallbackReply {
                text: GREETING_REPLY.to_string(),
                kind: ReplyKind::Greeting,
                emotion: None,
                context: None,
            };
        }

        let (emotion, context) = self.analyze(text);

        let (text, kind) = match self.table.lookup(emotion.primary, context.problem_type) {
            Some(entry) => (entry, ReplyKind::Table),
            None => (self.table.generic(self.rng.as_ref()), ReplyKind::Generic),
        };

        debug!(
            emotion = %emotion.primary,
            intensity = emotion.intensity,
            problem = %context.problem_type,
            severity = ?context.severity,
            kind = ?kind,
            "Fallback reply selected"
        );

        FallbackReply {
            text: text.to_string(),
            kind,
            emotion: Some(emotion),
            context: Some(context),
        }
    }
}
