//! Completion API client.
//!
//! Sends a system/user prompt pair to the chat-completion endpoint and
//! returns the raw generated text. Retries are driven by an explicit
//! [`Attempt`] state machine: bounded, sequential, with a model switch when
//! the failure looks like a rate limit and a fallback model is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::core::config::AppConfig;
use crate::errors::SummarizeError;

/// Upper bound for one completion call.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Generated text shorter than this (after trimming) is treated as a failed
/// generation and is retryable.
const MIN_GENERATED_LEN: usize = 10;

/// Collaborator contract: given prompts and a model id, return the raw
/// generated text or fail with a classified error.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, SummarizeError>;
}

/// Configuration for the HTTP completion client, injected at construction.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: String,
    pub fallback_model: Option<String>,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub max_tokens: u32,
}

impl CompletionConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_url: config.completion_api_url.clone(),
            api_key: config.completion_api_key.clone(),
            fallback_model: config.fallback_model.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            max_tokens: config.max_tokens,
        }
    }
}

/// Transient retry-loop state: created at call start, stepped per failure,
/// discarded on success or exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Attempt {
    model: String,
    attempts_left: u32,
}

/// Outcome of stepping the retry state machine after a failure.
#[derive(Debug)]
enum AttemptOutcome {
    Retry { next: Attempt, delay: Duration },
    Fail(SummarizeError),
}

impl Attempt {
    /// Decides what happens after a failed call: retry (possibly on the
    /// fallback model), or surface the last error verbatim once exhausted.
    /// The delay doubles with each attempt already spent.
    fn step(
        self,
        error: SummarizeError,
        fallback_model: Option<&str>,
        base_delay: Duration,
        attempts_spent: u32,
    ) -> AttemptOutcome {
        if self.attempts_left == 0 {
            return AttemptOutcome::Fail(error);
        }

        let model = match fallback_model {
            Some(fb) if is_rate_limit_error(&error) && fb != self.model => {
                warn!(from = %self.model, to = %fb, "Rate limit detected, switching to fallback model");
                fb.to_string()
            }
            _ => self.model,
        };

        AttemptOutcome::Retry {
            next: Attempt {
                model,
                attempts_left: self.attempts_left - 1,
            },
            delay: base_delay * 2u32.saturating_pow(attempts_spent),
        }
    }
}

/// Detects rate-limit-shaped failures: HTTP 429 or quota/capacity wording.
fn is_rate_limit_error(error: &SummarizeError) -> bool {
    let message = error.to_string().to_ascii_lowercase();
    ["429", "quota", "rate limit", "rate-limit", "capacity", "too many requests"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// HTTP client for the chat-completion endpoint.
pub struct HttpCompletionClient {
    http: Client,
    config: CompletionConfig,
}

impl HttpCompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self, SummarizeError> {
        let http = Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .map_err(|e| {
                SummarizeError::ProcessingError(format!("failed to build completion client: {e}"))
            })?;

        Ok(Self { http, config })
    }

    /// One outbound call, no retry. Validates the response shape and rejects
    /// empty or too-short generations so the retry loop can have another go.
    async fn call_once(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, SummarizeError> {
        #[cfg(feature = "debug-logs")]
        info!("Completion prompt (system):\n{system_prompt}\n(user):\n{user_prompt}");

        let request_body = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt }
            ],
            "max_tokens": self.config.max_tokens
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::AiServiceError(format!(
                        "completion request timed out after {}s",
                        COMPLETION_TIMEOUT.as_secs()
                    ))
                } else {
                    SummarizeError::AiServiceError(format!("completion request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error body: {e}"));
            return Err(SummarizeError::AiServiceError(format!(
                "completion API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizeError::AiServiceError(format!("malformed completion response: {e}"))
        })?;

        let text = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                SummarizeError::AiServiceError(
                    "malformed completion response: missing choices[0].message.content"
                        .to_string(),
                )
            })?;

        let trimmed = text.trim();
        let generated_chars = trimmed.chars().count();
        if generated_chars < MIN_GENERATED_LEN {
            return Err(SummarizeError::AiServiceError(format!(
                "insufficient content generated ({generated_chars} chars)"
            )));
        }

        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, SummarizeError> {
        let mut attempt = Attempt {
            model: model.to_string(),
            attempts_left: self.config.max_retries,
        };
        let mut attempts_spent = 0u32;

        loop {
            info!(model = %attempt.model, attempts_left = attempt.attempts_left, "Calling completion API");

            let error = match self
                .call_once(system_prompt, user_prompt, &attempt.model)
                .await
            {
                Ok(text) => return Ok(text),
                Err(e) => e,
            };

            warn!(model = %attempt.model, error = %error, "Completion attempt failed");

            match attempt.step(
                error,
                self.config.fallback_model.as_deref(),
                self.config.retry_delay,
                attempts_spent,
            ) {
                AttemptOutcome::Retry { next, delay } => {
                    tokio::time::sleep(delay).await;
                    attempt = next;
                    attempts_spent += 1;
                }
                AttemptOutcome::Fail(last_error) => return Err(last_error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(model: &str, attempts_left: u32) -> Attempt {
        Attempt {
            model: model.to_string(),
            attempts_left,
        }
    }

    #[test]
    fn step_retries_on_same_model_for_generic_failures() {
        let err = SummarizeError::AiServiceError("malformed completion response".to_string());
        match attempt("gpt-4o-mini", 1).step(err, Some("gpt-3.5-turbo"), Duration::from_secs(1), 0)
        {
            AttemptOutcome::Retry { next, delay } => {
                assert_eq!(next, attempt("gpt-4o-mini", 0));
                assert_eq!(delay, Duration::from_secs(1));
            }
            AttemptOutcome::Fail(e) => panic!("expected retry, got fail: {e}"),
        }
    }

    #[test]
    fn step_switches_to_fallback_on_rate_limit() {
        let err = SummarizeError::AiServiceError(
            "completion API error (status 429 Too Many Requests): slow down".to_string(),
        );
        match attempt("gpt-4o-mini", 1).step(err, Some("gpt-3.5-turbo"), Duration::from_secs(1), 0)
        {
            AttemptOutcome::Retry { next, .. } => assert_eq!(next.model, "gpt-3.5-turbo"),
            AttemptOutcome::Fail(e) => panic!("expected retry, got fail: {e}"),
        }
    }

    #[test]
    fn step_keeps_model_when_fallback_already_in_use() {
        let err = SummarizeError::AiServiceError("quota exceeded".to_string());
        match attempt("gpt-3.5-turbo", 1).step(
            err,
            Some("gpt-3.5-turbo"),
            Duration::from_secs(1),
            1,
        ) {
            AttemptOutcome::Retry { next, delay } => {
                assert_eq!(next.model, "gpt-3.5-turbo");
                // Second attempt doubles the base delay.
                assert_eq!(delay, Duration::from_secs(2));
            }
            AttemptOutcome::Fail(e) => panic!("expected retry, got fail: {e}"),
        }
    }

    #[test]
    fn step_surfaces_last_error_verbatim_when_exhausted() {
        let err = SummarizeError::AiServiceError("the original failure".to_string());
        match attempt("gpt-4o-mini", 0).step(err, Some("gpt-3.5-turbo"), Duration::from_secs(1), 1)
        {
            AttemptOutcome::Fail(e) => {
                assert!(e.to_string().contains("the original failure"));
            }
            AttemptOutcome::Retry { .. } => panic!("expected fail after exhaustion"),
        }
    }

    #[test]
    fn rate_limit_detection_is_keyword_driven() {
        for msg in [
            "completion API error (status 429 Too Many Requests): nope",
            "quota exceeded for this key",
            "model is at capacity right now",
            "Rate limit reached",
        ] {
            let err = SummarizeError::AiServiceError(msg.to_string());
            assert!(is_rate_limit_error(&err), "should detect: {msg}");
        }

        let err = SummarizeError::AiServiceError("connection reset".to_string());
        assert!(!is_rate_limit_error(&err));
    }
}
