use crate::actors::llm::{LlmActorHandle, COMPANION_SYSTEM_PROMPT};
use crate::actors::messages::CompanionMessage;
use crate::actors::traits::LlmActor;
use crate::brain::CompanionBrain;
use crate::config::LlmConfig;
use crate::database;
use crate::error::AppError;
use crate::models::{ChatMessage, ChatReply, ReplyAnalysis, ReplySource, Role};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// Round-trip bound for a chat message: LLM attempt plus two writes.
const PROCESS_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// A handle to the `CompanionActor`.
///
/// Entry point for chat: asks the external model first and falls back to the
/// rule-based brain on any failure, so a reply is always produced.
#[derive(Clone)]
pub struct CompanionHandle {
    sender: mpsc::Sender<CompanionMessage>,
    db_pool: SqlitePool,
    process_timeout: Duration,
}

impl CompanionHandle {
    /// Spawns the companion with a live `LlmActorHandle` and a thread-RNG brain.
    pub fn new(db_pool: SqlitePool, llm_config: LlmConfig) -> Self {
        let llm_timeout = llm_config.timeout;
        let llm = LlmActorHandle::new(llm_config);
        if !llm.is_configured() {
            info!("LLM_API_KEY not set; every reply will come from the fallback brain");
        }
        Self::with_parts(db_pool, Arc::new(llm), CompanionBrain::new(), llm_timeout)
    }

    /// Spawns the companion with injected collaborators.
    pub fn with_parts<L: LlmActor>(
        db_pool: SqlitePool,
        llm_actor: Arc<L>,
        brain: CompanionBrain,
        llm_timeout: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(64);
        let runner = CompanionRunner {
            receiver,
            llm_actor,
            brain,
            db_pool: db_pool.clone(),
            llm_timeout,
        };
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            db_pool,
            process_timeout: llm_timeout + PROCESS_TIMEOUT_SLACK,
        }
    }

    /// Processes a chat message from `user_id`.
    ///
    /// 1. Stores the user message.
    /// 2. Asks the external model, bounded by the LLM timeout.
    /// 3. Falls back to the brain on error, timeout or empty output.
    /// 4. Stores the reply with its provenance and returns it.
    ///
    /// Only storage or actor-channel failures produce an error.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub async fn process_message(&self, user_id: String, content: String) -> Result<ChatReply, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = CompanionMessage::ProcessUserMessage {
            user_id,
            content,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.process_timeout, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// The newest `limit` messages of `user_id`, oldest first.
    pub async fn history(&self, user_id: &str, limit: i64) -> Result<Vec<ChatMessage>, AppError> {
        Ok(database::get_chat_history(&self.db_pool, user_id, limit).await?)
    }

    /// Deletes the chat history of `user_id`; returns the number of messages removed.
    pub async fn clear_history(&self, user_id: &str) -> Result<u64, AppError> {
        let deleted = database::clear_chat_history(&self.db_pool, user_id).await?;
        info!(%user_id, deleted, "Chat history cleared");
        Ok(deleted)
    }

    /// Stops the companion loop. In-flight messages still complete.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(CompanionMessage::Shutdown).await;
    }
}

// --- Actor Runner ---
struct CompanionRunner<L>
where
    L: LlmActor,
{
    receiver: mpsc::Receiver<CompanionMessage>,
    llm_actor: Arc<L>,
    brain: CompanionBrain,
    db_pool: SqlitePool,
    llm_timeout: Duration,
}

/// Per-message state, moved onto its own task.
struct Exchange<L: LlmActor> {
    llm_actor: Arc<L>,
    brain: CompanionBrain,
    db_pool: SqlitePool,
    llm_timeout: Duration,
}

impl<L> CompanionRunner<L>
where
    L: LlmActor,
{
    async fn run(mut self) {
        info!("Companion started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CompanionMessage::ProcessUserMessage {
                    user_id,
                    content,
                    responder,
                } => {
                    let exchange = Exchange {
                        llm_actor: Arc::clone(&self.llm_actor),
                        brain: self.brain.clone(),
                        db_pool: self.db_pool.clone(),
                        llm_timeout: self.llm_timeout,
                    };
                    tokio::spawn(async move {
                        let result = exchange.handle_user_message(&user_id, content).await;
                        if let Err(e) = &result {
                            error!("Error processing user message: {:?}", e);
                        }
                        let _ = responder.send(result);
                    });
                }
                CompanionMessage::Shutdown => {
                    info!("Companion shutting down...");
                    break;
                }
            }
        }
        info!("Companion stopped");
    }
}

impl<L> Exchange<L>
where
    L: LlmActor,
{
    #[instrument(skip(self, content))]
    async fn handle_user_message(&self, user_id: &str, content: String) -> Result<ChatReply, AppError> {
        database::add_chat_message(&self.db_pool, user_id, Role::User, &content, None).await?;

        let reply = match self.ask_llm(&content).await {
            Some(text) => ChatReply {
                reply: text,
                source: ReplySource::Api,
                analysis: None,
            },
            None => {
                let fallback = self.brain.reply(&content);
                ChatReply {
                    reply: fallback.text,
                    source: ReplySource::Fallback,
                    analysis: Some(ReplyAnalysis {
                        kind: fallback.kind,
                        emotion: fallback.emotion,
                        context: fallback.context,
                    }),
                }
            }
        };

        database::add_chat_message(
            &self.db_pool,
            user_id,
            Role::Assistant,
            &reply.reply,
            Some(reply.source),
        )
        .await?;

        info!(source = %reply.source, "Reply produced");
        Ok(reply)
    }

    /// `None` means "use the fallback"; the reason is logged here.
    async fn ask_llm(&self, content: &str) -> Option<String> {
        let request = self
            .llm_actor
            .generate_reply(content.to_string(), Some(COMPANION_SYSTEM_PROMPT.to_string()));

        match timeout(self.llm_timeout, request).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                warn!("LLM returned an empty reply; using fallback");
                None
            }
            Ok(Err(AppError::Config(reason))) => {
                debug!(%reason, "LLM not configured; using fallback");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "LLM request failed; using fallback");
                None
            }
            Err(_) => {
                warn!(timeout_ms = self.llm_timeout.as_millis() as u64, "LLM timed out; using fallback");
                None
            }
        }
    }
}
