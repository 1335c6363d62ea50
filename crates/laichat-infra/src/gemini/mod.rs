//! Google Gemini completion provider implementation.
//!
//! This module provides the [`GeminiClient`] which implements the
//! [`CompletionProvider`](laichat_core::provider::CompletionProvider) trait
//! for the Gemini `generateContent` API, including SSE streaming support.

pub mod client;
pub mod streaming;
pub mod types;

pub use client::GeminiClient;
