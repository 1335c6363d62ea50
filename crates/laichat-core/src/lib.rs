//! Business logic and repository trait definitions for Laichat.
//!
//! This crate defines the "ports" (repository and transport traits) that
//! the infrastructure layer implements, plus the pure pieces of the chat
//! core: history sanitization, the session controller state machine, and
//! the quote flow. It depends only on `laichat-types` -- never on
//! `laichat-infra` or any database/IO crate.

pub mod chat;
pub mod profile;
pub mod provider;
pub mod quote;
pub mod sanitize;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
