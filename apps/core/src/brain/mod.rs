//! # Brain Module
//!
//! Rule-based reply engine for the Heartline chat companion.
//! Answers the user when the external language model is missing or failing.
//!
//! ## Components
//! - `keywords`: keyword sets and substring matching
//! - `emotion`: emotion classifier (frequency based, first category wins ties)
//! - `context`: problem-type classifier (priority based), severity and needs
//! - `responder`: response table, generic pool and greeting short-circuit
//! - `random`: injectable random source for the generic pool
//! - `analyzer`: `CompanionBrain`, the orchestrator

pub mod analyzer;
pub mod context;
pub mod emotion;
pub mod keywords;
pub mod random;
pub mod responder;

pub use analyzer::{CompanionBrain, FallbackReply, ReplyKind};
pub use context::{classify_context, ContextAnalysis, Need, ProblemType, Severity};
pub use emotion::{classify_emotion, EmotionAnalysis, EmotionCategory, Tone};
pub use random::{FixedSequence, RandomSource, SeededRandom, ThreadRandom};
pub use responder::{
    is_greeting, select_response, ResponseRow, ResponseTable, GENERIC_RESPONSES, GREETING_REPLY,
};
