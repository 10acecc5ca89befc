// ============================================================================
// Movie Routes
// ============================================================================
//
// Endpoints (all under /v1/api, all behind the bearer gate):
// - POST   /movies      create
// - GET    /movies/:id  retrieve
// - PUT    /movies/:id  replace
// - DELETE /movies/:id  delete
//
// ============================================================================

use axum::{extract::State, Json};
use movies_error::{AppError, AppResult};
use serde::Serialize;
use std::sync::Arc;

use crate::context::AppContext;
use crate::models::Movie;
use crate::routes::extractors::{MovieBody, MovieId};

pub const DELETED_MESSAGE: &str = "Movie deleted.";

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /v1/api/movies
pub async fn create_movie(
    State(ctx): State<Arc<AppContext>>,
    MovieBody(movie): MovieBody,
) -> AppResult<Json<MovieResponse>> {
    let movie = ctx.gateway.create(movie).await?;
    Ok(Json(MovieResponse { movie }))
}

/// GET /v1/api/movies/:id
pub async fn retrieve_movie(
    State(ctx): State<Arc<AppContext>>,
    MovieId(id): MovieId,
) -> AppResult<Json<MovieResponse>> {
    let movie = ctx.gateway.retrieve(&id).await?;
    Ok(Json(MovieResponse { movie }))
}

/// PUT /v1/api/movies/:id
///
/// The path id wins over any `movie-id` in the body.
pub async fn update_movie(
    State(ctx): State<Arc<AppContext>>,
    MovieId(id): MovieId,
    MovieBody(movie): MovieBody,
) -> AppResult<Json<MovieResponse>> {
    let movie = ctx.gateway.update(&id, movie).await?;
    Ok(Json(MovieResponse { movie }))
}

/// DELETE /v1/api/movies/:id
pub async fn delete_movie(
    State(ctx): State<Arc<AppContext>>,
    MovieId(id): MovieId,
) -> AppResult<Json<MessageResponse>> {
    ctx.gateway.delete(&id).await?;
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE,
    }))
}

/// GET/PUT/DELETE /v1/api/movies/ with an empty id segment
pub async fn missing_id() -> AppError {
    AppError::validation("Missing required id parameter.")
}
