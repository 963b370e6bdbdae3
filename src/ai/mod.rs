//! Completion API client and model-output cleanup.

pub mod client;
pub mod extract;

pub use client::{CompletionClient, CompletionConfig, HttpCompletionClient};
pub use extract::extract;
