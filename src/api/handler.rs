//! API entrypoint - routes Lambda events into the summarization pipeline.
//!
//! This module handles:
//! - CORS preflight (`OPTIONS`)
//! - JSON `POST` bodies (`{ url?, content?, style?, bulletCount?, model? }`)
//! - `GET` style-shortcut paths (`/<style-or-count>/<target-url>`)
//!
//! All failures, including config and parse errors, are rendered as the
//! structured error payload; nothing escapes as an unhandled error.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::helpers;
use crate::core::config::AppConfig;
use crate::core::models::SummarizeRequest;
use crate::errors::SummarizeError;
use crate::pipeline::Pipeline;
use crate::style;

pub use self::function_handler as handler;

/// Lambda handler for the summarization API.
///
/// # Errors
///
/// Infallible in practice: every failure path returns a structured JSON
/// error payload rather than an `Err`.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "Received request");

    let method = http_method(&event.payload);
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Ok(helpers::preflight_response());
    }

    let request = match parse_request(&event.payload, &method) {
        Ok(request) => request,
        Err(e) => {
            error!(%correlation_id, error = %e, "Failed to parse request");
            return Ok(helpers::error_response(&e));
        }
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(%correlation_id, error = %e, "Config error");
            return Ok(helpers::error_response(&SummarizeError::ProcessingError(
                format!("service misconfigured: {e}"),
            )));
        }
    };

    let pipeline = match Pipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(%correlation_id, error = %e, "Failed to build pipeline");
            return Ok(helpers::error_response(&e));
        }
    };

    match pipeline.summarize(&request).await {
        Ok(result) => {
            info!(%correlation_id, summary_chars = result.summary.chars().count(), "Summarization succeeded");
            Ok(helpers::success_response(&result))
        }
        Err(e) => {
            error!(%correlation_id, error = %e, error_code = e.code().as_str(), "Summarization failed");
            Ok(helpers::error_response(&e))
        }
    }
}

fn http_method(payload: &Value) -> String {
    payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .or_else(|| payload.get("httpMethod").and_then(Value::as_str))
        .unwrap_or("POST")
        .to_string()
}

fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(Value::as_str)
        .or_else(|| payload.get("path").and_then(Value::as_str))
}

/// Builds a `SummarizeRequest` from either a POST JSON body or a GET
/// style-shortcut path.
fn parse_request(payload: &Value, method: &str) -> Result<SummarizeRequest, SummarizeError> {
    if method.eq_ignore_ascii_case("GET") {
        let path = request_path(payload).unwrap_or("/");
        let (style_request, target) = style::parse_shortcut_path(path).ok_or_else(|| {
            SummarizeError::InvalidRequest(
                "shortcut path must look like /<style-or-count>/<target-url>".to_string(),
            )
        })?;

        return Ok(SummarizeRequest {
            url: Some(target),
            content: None,
            style: Some(style_request.raw),
            bullet_count: style_request.bullet_count,
            model: None,
        });
    }

    let body = payload
        .get("body")
        .and_then(Value::as_str)
        .ok_or_else(|| SummarizeError::InvalidRequest("missing request body".to_string()))?;

    serde_json::from_str::<SummarizeRequest>(body)
        .map_err(|e| SummarizeError::InvalidRequest(format!("invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_request_reads_a_post_json_body() {
        let payload = json!({
            "httpMethod": "POST",
            "body": json!({
                "url": "https://example.com/a",
                "style": "eli5",
                "bulletCount": 3
            })
            .to_string()
        });

        let request = parse_request(&payload, "POST").unwrap();
        assert_eq!(request.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(request.style.as_deref(), Some("eli5"));
        assert_eq!(request.bullet_count, Some(3));
    }

    #[test]
    fn parse_request_handles_get_shortcut_paths() {
        let payload = json!({
            "rawPath": "/tweet/https://example.com/article"
        });

        let request = parse_request(&payload, "GET").unwrap();
        assert_eq!(request.style.as_deref(), Some("tweet"));
        assert_eq!(request.url.as_deref(), Some("https://example.com/article"));
        assert!(request.content.is_none());
    }

    #[test]
    fn parse_request_rejects_missing_body_and_bad_json() {
        let payload = json!({ "httpMethod": "POST" });
        assert!(parse_request(&payload, "POST").is_err());

        let payload = json!({ "httpMethod": "POST", "body": "{not json" });
        assert!(parse_request(&payload, "POST").is_err());
    }

    #[test]
    fn http_method_reads_both_payload_shapes() {
        let v2 = json!({ "requestContext": { "http": { "method": "OPTIONS" } } });
        assert_eq!(http_method(&v2), "OPTIONS");

        let v1 = json!({ "httpMethod": "GET" });
        assert_eq!(http_method(&v1), "GET");

        assert_eq!(http_method(&json!({})), "POST");
    }
}
