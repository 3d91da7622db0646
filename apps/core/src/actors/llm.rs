use crate::actors::messages::LlmMessage;
use crate::actors::traits::LlmActor;
use crate::config::LlmConfig;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

/// Default persona for the external model.
pub const COMPANION_SYSTEM_PROMPT: &str = "คุณคือเพื่อนคู่คิดด้านความรักของคู่รักในแอป Heartline \
ตอบเป็นภาษาไทยด้วยน้ำเสียงอบอุ่น อ่อนโยน และไม่ตัดสิน \
ให้กำลังใจก่อน แล้วจึงให้คำแนะนำที่ทำได้จริงไม่เกิน 3 ข้อ ตอบสั้นกระชับไม่เกิน 5 ประโยค \
หากผู้ใช้มีสัญญาณวิกฤตทางอารมณ์ ให้แนะนำให้ติดต่อคนใกล้ชิดหรือสายด่วนสุขภาพจิต 1323";

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 500;
/// Slack on top of the request timeout for the channel round-trip.
const HANDLE_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// A handle to the `LlmActor`.
///
/// Cloneable front for the running actor task. The actor talks to an
/// OpenAI-compatible `chat/completions` endpoint.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    request_timeout: Duration,
    configured: bool,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    pub fn new(config: LlmConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let request_timeout = config.timeout;
        let configured = config.api_key.is_some();
        let actor = LlmActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout,
            configured,
        }
    }

    /// Whether an API key is present. Without one every call fails fast.
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn generate_reply(&self, message: String, system_prompt: Option<String>) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::GenerateReply {
            message,
            system_prompt,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(self.request_timeout + HANDLE_TIMEOUT_SLACK, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    client: Client,
    config: Arc<LlmConfig>,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, config: LlmConfig) -> Self {
        Self {
            receiver,
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    async fn run(mut self) {
        info!(
            model = %self.config.model,
            configured = self.config.api_key.is_some(),
            "LlmActor started"
        );

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }

        info!("LlmActor stopped");
    }

    /// Each request runs on its own task so one slow completion does not
    /// hold up the queue.
    fn handle_message(&self, msg: LlmMessage) {
        match msg {
            LlmMessage::GenerateReply {
                message,
                system_prompt,
                responder,
            } => {
                let client = self.client.clone();
                let config = Arc::clone(&self.config);
                tokio::spawn(async move {
                    let result = generate_completion(&client, &config, message, system_prompt).await;
                    let _ = responder.send(result);
                });
            }
        }
    }
}

fn build_request(
    client: &Client,
    config: &LlmConfig,
    api_key: &str,
    payload: &serde_json::Value,
) -> Result<reqwest::RequestBuilder, AppError> {
    let mut headers = HeaderMap::new();
    let auth_value = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| AppError::Config(format!("LLM_API_KEY is not a valid header value: {}", e)))?;
    headers.insert(AUTHORIZATION, auth_value);

    let endpoint = format!("{}/chat/completions", config.base_url.as_str().trim_end_matches('/'));
    Ok(client.post(endpoint).headers(headers).json(payload))
}

#[instrument(skip_all, fields(model = %config.model))]
async fn generate_completion(
    client: &Client,
    config: &LlmConfig,
    message: String,
    system_prompt: Option<String>,
) -> Result<String, AppError> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| AppError::Config("LLM_API_KEY is not set".to_string()))?;

    debug!(message_len = message.len(), "LLM generating reply");

    let system = system_prompt.unwrap_or_else(|| COMPANION_SYSTEM_PROMPT.to_string());
    let payload = serde_json::json!({
        "model": config.model,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": message }
        ],
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS
    });

    let request_future = build_request(client, config, api_key, &payload)?.send();
    let res = timeout(config.timeout, request_future).await??;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        error!(%status, "Completion request failed");
        return Err(AppError::Actor(format!(
            "Completion request failed with status {}: {}",
            status, body
        )));
    }

    let completion: ChatCompletionResponse = res
        .json()
        .await
        .map_err(|e| AppError::Actor(format!("Malformed completion response: {}", e)))?;

    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::Actor("Completion response had no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server_url: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            api_key: api_key.map(str::to_string),
            base_url: Url::parse(&format!("{}/v1", server_url)).unwrap(),
            model: "test-model".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_generate_reply_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(&mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "test-model" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "  กอดนะ  " } }]
            })))
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.generate_reply("เหนื่อยจัง".to_string(), None).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "กอดนะ");
    }

    #[tokio::test]
    async fn test_generate_reply_server_error() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(&mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = handle.generate_reply("Hello".to_string(), None).await;

        if let Err(AppError::Actor(err_msg)) = result {
            assert!(err_msg.contains("Completion request failed with status 500"));
            assert!(err_msg.contains("Internal Server Error"));
        } else {
            panic!("Expected AppError::Actor, got {:?}", result);
        }
    }

    #[tokio::test]
    async fn test_generate_reply_empty_content() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(&mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "   " } }]
            })))
            .mount(&mock_server)
            .await;

        let result = handle.generate_reply("Hello".to_string(), None).await;
        assert!(matches!(result, Err(AppError::Actor(_))));
    }

    #[tokio::test]
    async fn test_generate_reply_times_out() {
        let mock_server = MockServer::start().await;
        let mut config = test_config(&mock_server.uri(), Some("sk-test"));
        config.timeout = Duration::from_millis(100);
        let handle = LlmActorHandle::new(config);

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "choices": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let result = handle.generate_reply("Hello".to_string(), None).await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(&mock_server.uri(), None));
        assert!(!handle.is_configured());

        let result = handle.generate_reply("Hello".to_string(), None).await;
        assert!(matches!(result, Err(AppError::Config(_))));

        let received = mock_server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }
}
