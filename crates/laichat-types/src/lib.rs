//! Shared domain types for Laichat.
//!
//! This crate contains the types used across the Laichat platform:
//! conversations and messages, wire turns and payloads, quotes, profiles,
//! and their associated error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod client;
pub mod completion;
pub mod config;
pub mod conversation;
pub mod error;
pub mod profile;
pub mod quote;
pub mod turn;
