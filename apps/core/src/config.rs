//! Runtime configuration, read from the environment (and `.env` if present).

use crate::error::AppError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://heartline.sqlite?mode=rwc";
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CHAT_RATE_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Bunyan-style JSON lines
    Json,
    Pretty,
}

/// Settings for the external generative-text service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` disables the service; every reply then comes from the brain.
    pub api_key: Option<String>,
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Url::parse(DEFAULT_LLM_BASE_URL).expect("default LLM base URL is valid"),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// HS256 secret used to verify bearer tokens.
    pub jwt_secret: String,
    pub llm: LlmConfig,
    /// Chat messages allowed per user per minute.
    pub chat_rate_limit: usize,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the configuration from the environment.
    pub fn load() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads the configuration from the process environment only.
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".to_string()))?;

        let base_url = Url::parse(&var_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "LLM_BASE_URL must be http(s), got {}",
                base_url.scheme()
            )));
        }

        let timeout_secs = parse_var("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?;
        let chat_rate_limit = parse_var("CHAT_RATE_LIMIT", DEFAULT_CHAT_RATE_LIMIT)?;
        if chat_rate_limit == 0 {
            return Err(AppError::Config("CHAT_RATE_LIMIT must be positive".to_string()));
        }

        let log_format = match var_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            other => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be json or pretty, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            bind_addr,
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            jwt_secret,
            llm: LlmConfig {
                api_key: env::var("LLM_API_KEY").ok().filter(|s| !s.trim().is_empty()),
                base_url,
                model: var_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                timeout: Duration::from_secs(timeout_secs),
            },
            chat_rate_limit,
            log_format,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid: {}", key, e))),
        Err(_) => Ok(default),
    }
}
