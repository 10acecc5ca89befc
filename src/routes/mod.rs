// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: Main router assembly and middleware
// - movies.rs: Movie CRUD endpoints
// - extractors.rs: Bearer token, path id and JSON body extraction
// - middleware.rs: Bearer authentication gate
//
// ============================================================================

pub mod extractors;
pub mod middleware;
pub mod movies;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use movies_config::API_PREFIX;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    let api = Router::new()
        .route("/movies", post(movies::create_movie))
        .route(
            "/movies/",
            get(movies::missing_id)
                .put(movies::missing_id)
                .delete(movies::missing_id),
        )
        .route(
            "/movies/:id",
            get(movies::retrieve_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        // Outermost first: rejected requests are traced too, and the gate
        // covers every route and the fallback
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(LatencyUnit::Millis),
                        ),
                )
                .layer(axum::middleware::from_fn_with_state(
                    app_context.clone(),
                    middleware::require_bearer_auth,
                ))
                .into_inner(),
        )
        .with_state(app_context)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({
            "message": "Not found",
            "error_code": "NOT_FOUND",
        })),
    )
}
