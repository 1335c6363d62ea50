//! HTTP server layer.
//!
//! Axum router, request handlers, extractors, and error mapping for
//! the REST API consumed by the web client and the `laichat chat`
//! terminal client.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
