//! The summarization pipeline.
//!
//! Thin composition of the resolver, prompt builder, fetcher, completion
//! client, and extractor. Each request runs end-to-end sequentially and
//! returns either a complete result or one classified error, never a mix.

use tracing::info;

use crate::ai::client::{CompletionClient, CompletionConfig, HttpCompletionClient};
use crate::ai::extract::extract;
use crate::core::config::AppConfig;
use crate::core::models::{
    MIN_CONTENT_LEN, MIN_SUMMARY_LEN, SummarizeRequest, SummarizeResult, SummarizeTarget,
    truncate_content,
};
use crate::errors::SummarizeError;
use crate::fetch::{ContentFetcher, ProxyContentFetcher};
use crate::{prompt, style};

pub struct Pipeline {
    fetcher: Box<dyn ContentFetcher>,
    completer: Box<dyn CompletionClient>,
    default_model: String,
}

impl Pipeline {
    pub fn new(
        fetcher: Box<dyn ContentFetcher>,
        completer: Box<dyn CompletionClient>,
        default_model: String,
    ) -> Self {
        Self {
            fetcher,
            completer,
            default_model,
        }
    }

    /// Wires the real HTTP collaborators from injected configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, SummarizeError> {
        let fetcher = ProxyContentFetcher::new(&config.content_proxy_url)?;
        let completer = HttpCompletionClient::new(CompletionConfig::from_app_config(config))?;
        Ok(Self::new(
            Box::new(fetcher),
            Box::new(completer),
            config.default_model.clone(),
        ))
    }

    /// Runs one summarization request through the full pipeline.
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResult, SummarizeError> {
        let target = request.validate()?;

        let (content, source_url) = match target {
            SummarizeTarget::Url(raw_url) => {
                let url = normalize_url(&raw_url)?;
                let content = self.fetcher.fetch(&url).await?;
                (content, Some(url))
            }
            SummarizeTarget::Content(content) => (content, None),
        };

        let content = content.trim().to_string();
        let content_chars = content.chars().count();
        if content_chars < MIN_CONTENT_LEN {
            return Err(SummarizeError::ContentError(format!(
                "content is too short to summarize ({content_chars} chars, minimum {MIN_CONTENT_LEN})"
            )));
        }

        let resolved = style::resolve(
            request.style.as_deref().unwrap_or(""),
            request.bullet_count,
        );
        info!(style = %resolved.id, is_custom = resolved.is_custom, "Resolved style");

        let system_prompt = prompt::system_prompt(&resolved);
        let user_prompt = prompt::user_prompt(truncate_content(&content), source_url.as_deref());

        let model = request
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model);

        let raw_output = self
            .completer
            .complete(&system_prompt, &user_prompt, model)
            .await?;

        let summary = extract(&raw_output);
        let summary_chars = summary.chars().count();
        if summary_chars < MIN_SUMMARY_LEN {
            return Err(SummarizeError::AiServiceError(format!(
                "insufficient content in generated summary ({summary_chars} chars)"
            )));
        }

        Ok(SummarizeResult {
            original_content: content,
            summary,
        })
    }
}

/// Normalizes a target URL: repairs a collapsed scheme slash, prepends
/// `https://` when no scheme is present, and validates the result.
pub fn normalize_url(raw: &str) -> Result<String, SummarizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SummarizeError::UrlError("empty URL".to_string()));
    }

    // Path-based shortcuts often collapse "https://" down to "https:/".
    let repaired = if let Some(rest) = trimmed.strip_prefix("https:/") {
        if rest.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("https://{rest}")
        }
    } else if let Some(rest) = trimmed.strip_prefix("http:/") {
        if rest.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("http://{rest}")
        }
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&repaired)
        .map_err(|e| SummarizeError::UrlError(format!("invalid URL {raw:?}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(SummarizeError::UrlError(format!(
            "invalid URL {raw:?}: missing host"
        )));
    }

    Ok(repaired)
}
