//! Request and response shapes shared across the pipeline.

use serde::{Deserialize, Serialize};

use crate::errors::SummarizeError;

/// Minimum trimmed length for content to be eligible for summarization.
pub const MIN_CONTENT_LEN: usize = 100;

/// Minimum cleaned summary length; anything shorter is a generation failure.
pub const MIN_SUMMARY_LEN: usize = 10;

/// Content longer than this is truncated (at a char boundary) before
/// prompting rather than rejected.
pub const MAX_CONTENT_LEN: usize = 80_000;

/// Inbound request body as received over the wire. Duck-typed fields are
/// validated once at the boundary via [`SummarizeRequest::validate`];
/// downstream components only ever see the validated shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub bullet_count: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Validated summarization target: exactly one of URL or inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeTarget {
    Url(String),
    Content(String),
}

impl SummarizeRequest {
    /// Validates the mutual-exclusion invariant and returns the tagged
    /// target. Fails fast before any network call.
    pub fn validate(&self) -> Result<SummarizeTarget, SummarizeError> {
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let content = self
            .content
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (url, content) {
            (Some(u), None) => Ok(SummarizeTarget::Url(u.to_string())),
            (None, Some(c)) => Ok(SummarizeTarget::Content(c.to_string())),
            (Some(_), Some(_)) => Err(SummarizeError::InvalidRequest(
                "provide either a URL or content, not both".to_string(),
            )),
            (None, None) => Err(SummarizeError::InvalidRequest(
                "either a URL or content is required".to_string(),
            )),
        }
    }
}

/// Successful pipeline output. Never persisted; returned to the caller only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResult {
    pub original_content: String,
    pub summary: String,
}

/// Truncates content to [`MAX_CONTENT_LEN`], respecting char boundaries.
#[must_use]
pub fn truncate_content(content: &str) -> &str {
    if content.len() <= MAX_CONTENT_LEN {
        return content;
    }
    let mut end = MAX_CONTENT_LEN;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}
