//! Infrastructure layer for Laichat.
//!
//! Contains implementations of the repository and transport traits defined
//! in `laichat-core`: SQLite storage with a split read/write pool, the
//! Gemini completion provider, client-local state, and the HTTP transport
//! the CLI chat uses to reach a running gateway.

pub mod config;
pub mod gemini;
pub mod localstate;
pub mod sqlite;
pub mod transport;
