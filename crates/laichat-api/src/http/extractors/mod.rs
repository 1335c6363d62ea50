//! Request extractors for the HTTP layer.

pub mod identity;
