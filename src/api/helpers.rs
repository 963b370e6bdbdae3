//! Response builders for the API handler.
//!
//! Every response, success or failure, is HTTP 200 with the same permissive
//! CORS headers and a well-formed JSON body, so clients have exactly one
//! shape to render per outcome.

use serde_json::{Value, json};

use crate::core::models::SummarizeResult;
use crate::errors::SummarizeError;

fn cors_headers() -> Value {
    json!({
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": "authorization, x-client-info, apikey, content-type",
        "Access-Control-Allow-Methods": "GET, POST, OPTIONS",
        "Content-Type": "application/json"
    })
}

/// Answers a CORS preflight request.
#[must_use]
pub fn preflight_response() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": "{}"
    })
}

/// Returns a 200 OK response carrying the summarization result.
#[must_use]
pub fn success_response(result: &SummarizeResult) -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": json!({
            "originalContent": result.original_content,
            "summary": result.summary
        })
        .to_string()
    })
}

/// Returns a structured error payload. Deliberately still HTTP 200: the
/// client inspects `errorCode`, never the transport status.
#[must_use]
pub fn error_response(error: &SummarizeError) -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": json!({
            "error": error.to_string(),
            "errorCode": error.code().as_str(),
            "originalContent": "",
            "summary": ""
        })
        .to_string()
    })
}
