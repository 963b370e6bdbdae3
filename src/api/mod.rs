//! HTTP-facing request routing and response building.

pub mod handler;
pub mod helpers;

pub use handler::function_handler;
