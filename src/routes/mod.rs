//! Route modules for Folio Server

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod documents;
pub mod health;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config().server.cors_allowed_origins.as_deref());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/documents", documents::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    // Range-aware viewers read these from cross-origin responses
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            header::ACCEPT_RANGES,
            header::CONTENT_LENGTH,
            header::CONTENT_RANGE,
            header::ETAG,
            header::LAST_MODIFIED,
        ]);

    match origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            layer.allow_origin(allowed)
        }
        None => layer.allow_origin(Any),
    }
}
