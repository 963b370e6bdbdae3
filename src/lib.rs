//! gist - a style-aware content summarization service.
//!
//! Accepts a URL or raw text plus a requested style (a preset like `eli5`
//! or `bullets`, or any free-form token interpreted creatively by the
//! model), fetches readable page text through a content proxy, and returns
//! a cleaned, style-transformed summary from a chat-completion API.
//!
//! # Architecture
//!
//! The pipeline is a linear composition:
//! - [`style`] resolves the raw style token into a canonical id,
//! - [`prompt`] maps it onto system/user instructions,
//! - [`fetch`] retrieves page text through the proxy (URL requests only),
//! - [`ai`] calls the completion API with bounded retry and model fallback,
//!   then strips delimiter markers and artifacts from the output,
//! - [`pipeline`] sequences the steps and classifies every failure into the
//!   closed [`errors::ErrorCode`] taxonomy,
//! - [`api`] exposes it all over a Lambda HTTP handler with permissive CORS.
//!
//! Nothing persists beyond one request; concurrent requests share no state.

pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod fetch;
pub mod pipeline;
pub mod prompt;
pub mod style;

/// Configure structured JSON logging suitable for CloudWatch.
///
/// Call once at binary start; the filter honors `RUST_LOG` and defaults to
/// `info`.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
