//! Axum router configuration with middleware.
//!
//! All API routes are under `/api`. Middleware: permissive CORS (the
//! web client may be served from another origin) and request tracing.
//!
//! When a built web client exists on disk (`LAICHAT_WEB_DIR`, default
//! `web/dist`), it is served as a fallback; API routes and `/health`
//! take priority and unknown paths fall through to `index.html` for
//! client-side routing. Without the directory, only the API is served.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Completion gateway
        .route("/chat", post(handlers::chat::completion))
        // Profile
        .route(
            "/profile",
            get(handlers::profile::get_profile).post(handlers::profile::update_profile),
        )
        // Conversations
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations),
        )
        .route(
            "/conversations/search",
            get(handlers::conversation::search_conversations),
        )
        .route(
            "/conversations/{id}",
            put(handlers::conversation::rename_conversation)
                .delete(handlers::conversation::delete_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            get(handlers::conversation::list_messages),
        )
        // Messages
        .route("/messages/{id}", put(handlers::conversation::edit_message))
        // Quotes
        .route("/quote/daily", get(handlers::quote::daily))
        .route("/quote/generate", post(handlers::quote::generate));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built web client from disk if the directory exists.
    let web_dir = std::env::var("LAICHAT_WEB_DIR").unwrap_or_else(|_| "web/dist".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "web client static file serving enabled");
    }

    router
}

/// GET /health - liveness check, no identity required.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
