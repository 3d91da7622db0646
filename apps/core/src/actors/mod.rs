//! Actor system: the external language-model client and the chat companion
//! that falls back to the rule-based brain.

pub mod companion;
pub mod llm;
pub mod messages;
pub mod traits;
