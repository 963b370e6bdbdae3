use std::env;
use std::time::Duration;

pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CONTENT_PROXY_URL: &str = "https://r.jina.ai/";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// Injected configuration for the pipeline and its collaborators.
///
/// Passed explicitly to the clients at construction, never read as ambient
/// global state, so the pipeline stays testable with fakes and mock servers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub completion_api_url: String,
    pub completion_api_key: String,
    pub content_proxy_url: String,
    pub default_model: String,
    pub fallback_model: Option<String>,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub max_tokens: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            completion_api_url: env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_api_key: env::var("COMPLETION_API_KEY")
                .map_err(|e| format!("COMPLETION_API_KEY: {e}"))?,
            content_proxy_url: env::var("CONTENT_PROXY_URL")
                .unwrap_or_else(|_| DEFAULT_CONTENT_PROXY_URL.to_string()),
            default_model: env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            fallback_model: env::var("FALLBACK_MODEL")
                .ok()
                .or_else(|| Some(DEFAULT_FALLBACK_MODEL.to_string()))
                .filter(|m| !m.trim().is_empty()),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            retry_delay: Duration::from_millis(
                env::var("RETRY_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
            max_tokens: env::var("MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
        })
    }
}
