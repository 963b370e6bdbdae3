//! Pipeline orchestration tests with fake collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gist::ai::client::CompletionClient;
use gist::core::models::SummarizeRequest;
use gist::errors::{ErrorCode, SummarizeError};
use gist::fetch::ContentFetcher;
use gist::pipeline::Pipeline;

struct FakeFetcher {
    calls: Arc<AtomicUsize>,
    content: Option<String>,
}

#[async_trait]
impl ContentFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.content.clone().ok_or_else(|| {
            SummarizeError::ConnectionError(format!("access denied (403 Forbidden) when fetching {url}"))
        })
    }
}

struct FakeCompleter {
    calls: Arc<AtomicUsize>,
    output: String,
}

#[async_trait]
impl CompletionClient for FakeCompleter {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _model: &str,
    ) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

fn article() -> String {
    "The committee voted to adopt the new transit plan after a long public hearing. \
     Construction is expected to begin next spring and take about three years."
        .to_string()
}

fn pipeline_with(
    fetch_calls: &Arc<AtomicUsize>,
    fetched: Option<String>,
    complete_calls: &Arc<AtomicUsize>,
    output: &str,
) -> Pipeline {
    Pipeline::new(
        Box::new(FakeFetcher {
            calls: Arc::clone(fetch_calls),
            content: fetched,
        }),
        Box::new(FakeCompleter {
            calls: Arc::clone(complete_calls),
            output: output.to_string(),
        }),
        "test-model".to_string(),
    )
}

#[tokio::test]
async fn missing_url_and_content_fails_before_any_collaborator_call() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(&fetch_calls, Some(article()), &complete_calls, "irrelevant");

    let err = pipeline
        .summarize(&SummarizeRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ProcessingError);
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 0);
    assert_eq!(complete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn short_content_fails_without_calling_the_completion_api() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(&fetch_calls, None, &complete_calls, "irrelevant");

    let request = SummarizeRequest {
        content: Some("way too short".to_string()),
        ..Default::default()
    };
    let err = pipeline.summarize(&request).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ContentError);
    assert!(err.to_string().contains("too short"));
    assert_eq!(complete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn fetch_failure_maps_to_connection_error() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(&fetch_calls, None, &complete_calls, "irrelevant");

    let request = SummarizeRequest {
        url: Some("https://example.com/private".to_string()),
        ..Default::default()
    };
    let err = pipeline.summarize(&request).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::ConnectionError);
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(complete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn short_cleaned_output_is_a_generation_failure() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(
        &fetch_calls,
        Some(article()),
        &complete_calls,
        "### START ###\nok\n### END ###",
    );

    let request = SummarizeRequest {
        content: Some(article()),
        ..Default::default()
    };
    let err = pipeline.summarize(&request).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::AiServiceError);
    assert!(err.to_string().contains("insufficient"));
}

#[tokio::test]
async fn url_request_returns_cleaned_summary_and_fetched_content() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(
        &fetch_calls,
        Some(article()),
        &complete_calls,
        "### START ###\nA transit plan was adopted and building starts in spring.\n### END ###",
    );

    let request = SummarizeRequest {
        url: Some("example.com/news".to_string()),
        style: Some("concise".to_string()),
        ..Default::default()
    };
    let result = pipeline.summarize(&request).await.unwrap();

    assert_eq!(
        result.summary,
        "A transit plan was adopted and building starts in spring."
    );
    assert_eq!(result.original_content, article());
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 1);
    assert_eq!(complete_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn content_request_never_touches_the_fetcher() {
    let fetch_calls = Arc::new(AtomicUsize::new(0));
    let complete_calls = Arc::new(AtomicUsize::new(0));
    let pipeline = pipeline_with(
        &fetch_calls,
        None,
        &complete_calls,
        "### START ###\nSummary of the supplied text, suitably long.\n### END ###",
    );

    let request = SummarizeRequest {
        content: Some(article()),
        style: Some("pirate".to_string()),
        ..Default::default()
    };
    let result = pipeline.summarize(&request).await.unwrap();

    assert!(!result.summary.is_empty());
    assert_eq!(fetch_calls.load(Ordering::SeqCst), 0);
    assert_eq!(complete_calls.load(Ordering::SeqCst), 1);
}
