//! Content retrieval through the external fetch proxy.
//!
//! The proxy fetches an arbitrary URL and returns best-effort plain text;
//! its HTML-stripping heuristics are its own business. This module only
//! wraps the call with a timeout and maps HTTP statuses onto the error
//! taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::errors::SummarizeError;

/// Upper bound for one proxy fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Collaborator contract: given a URL, return best-effort plain text or fail
/// with a classified error.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SummarizeError>;
}

/// Fetches page text through a URL-rewriting proxy service.
pub struct ProxyContentFetcher {
    http: Client,
    proxy_base: String,
}

impl ProxyContentFetcher {
    pub fn new(proxy_base: &str) -> Result<Self, SummarizeError> {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| {
                SummarizeError::ProcessingError(format!("failed to build fetch client: {e}"))
            })?;

        Ok(Self {
            http,
            proxy_base: proxy_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContentFetcher for ProxyContentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SummarizeError> {
        let proxied = format!("{}/{}", self.proxy_base, url);
        info!(target_url = %url, "Fetching content via proxy");

        let response = self.http.get(&proxied).send().await.map_err(|e| {
            if e.is_timeout() {
                SummarizeError::ConnectionError(format!(
                    "content fetch timed out after {}s for {url}",
                    FETCH_TIMEOUT.as_secs()
                ))
            } else {
                SummarizeError::ConnectionError(format!("content fetch failed for {url}: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, target_url = %url, "Proxy fetch returned non-success status");
            return Err(classify_fetch_status(status, url));
        }

        let body = response.text().await.map_err(|e| {
            SummarizeError::ConnectionError(format!("failed to read fetched body for {url}: {e}"))
        })?;

        if body.trim().is_empty() {
            return Err(SummarizeError::ContentError(format!(
                "no readable content found at {url}"
            )));
        }

        Ok(body)
    }
}

fn classify_fetch_status(status: StatusCode, url: &str) -> SummarizeError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SummarizeError::ConnectionError(
            format!("access denied ({status}) when fetching {url}"),
        ),
        StatusCode::NOT_FOUND => {
            SummarizeError::ConnectionError(format!("page not found (404) at {url}"))
        }
        s if s.is_server_error() => SummarizeError::ConnectionError(format!(
            "upstream server error ({s}) when fetching {url}"
        )),
        s => SummarizeError::ConnectionError(format!("fetch failed with status {s} for {url}")),
    }
}
