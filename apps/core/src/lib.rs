//! Heartline companion backend.
//!
//! "The Brain": a rule-based reply engine that answers couples' chat messages
//! when the external language model is unavailable, plus the thin HTTP,
//! storage and auth boundary around it.

pub mod actors;
pub mod auth;
pub mod brain;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod rate_limiter;
pub mod server;

#[cfg(test)]
mod tests;
