//! Quote endpoints: the deterministic daily pick and provider-backed
//! generation.

use axum::extract::State;
use axum::Json;

use laichat_core::quote::{daily_quote, QuoteGenerator};
use laichat_types::quote::Quote;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/quote/daily -- today's catalog quote. Pure; no identity.
pub async fn daily() -> Json<Quote> {
    Json(daily_quote())
}

/// POST /api/quote/generate -- ask the completion provider for a fresh
/// quote. Fails closed when no credential is configured, like the
/// gateway.
pub async fn generate(State(state): State<AppState>) -> Result<Json<Quote>, AppError> {
    let Some(provider) = state.provider.clone() else {
        return Err(AppError::Configuration("API Key missing".to_string()));
    };
    let quote = QuoteGenerator::new(provider).generate().await?;
    Ok(Json(quote))
}
