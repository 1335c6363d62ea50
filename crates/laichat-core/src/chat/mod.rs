//! Conversation persistence: repository trait and sentinel-returning service.

pub mod repository;
pub mod service;
