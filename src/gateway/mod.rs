// ============================================================================
// Entity Gateway
// ============================================================================
//
// Translates Movie operations into store calls:
// - create: write only if the id is unused
// - retrieve: read by id
// - update: full replace, only if the id exists
// - delete: remove, only if the id exists
//
// Existence checks are never done as a separate read; each operation is one
// conditional store call, so there is no window between check and write.
//
// ============================================================================

pub mod item;

use movies_error::{AppError, AppResult};
use std::sync::Arc;

use crate::models::movie::{release_date, Movie};
use crate::store::{MovieStore, WriteOutcome};

/// Stateless gateway over a shared store handle; safe to call concurrently
#[derive(Clone)]
pub struct MovieGateway {
    store: Arc<dyn MovieStore>,
}

impl MovieGateway {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Create a movie; fails with `DuplicateId` if the id is already taken
    pub async fn create(&self, movie: Movie) -> AppResult<Movie> {
        if movie.movie_id.is_empty() {
            return Err(AppError::validation("Missing movie id property"));
        }
        validate_fields(&movie)?;

        let stored = item::to_item(&movie);
        let outcome = self.store.put_if_absent(&movie.movie_id, &stored).await?;
        match outcome {
            WriteOutcome::Applied => {
                tracing::info!(movie_id = %movie.movie_id, "Movie created");
                Ok(movie)
            }
            WriteOutcome::ConditionFailed => Err(AppError::DuplicateId(movie.movie_id)),
        }
    }

    pub async fn retrieve(&self, id: &str) -> AppResult<Movie> {
        require_id(id)?;

        let stored = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;

        item::from_item(&stored)?.ok_or_else(|| {
            tracing::warn!(movie_id = %id, "Stored item has no movie id");
            AppError::NotFound(id.to_string())
        })
    }

    /// Replace every field of an existing movie
    ///
    /// The id comes from the caller (the request path); whatever id the
    /// payload carries is overwritten.
    pub async fn update(&self, id: &str, mut movie: Movie) -> AppResult<Movie> {
        require_id(id)?;
        movie.movie_id = id.to_string();
        validate_fields(&movie)?;

        let stored = item::to_item(&movie);
        match self.store.put_if_present(id, &stored).await? {
            WriteOutcome::Applied => {
                tracing::info!(movie_id = %id, "Movie updated");
                Ok(movie)
            }
            WriteOutcome::ConditionFailed => Err(AppError::NotFound(id.to_string())),
        }
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id)?;

        match self.store.delete_if_present(id).await? {
            WriteOutcome::Applied => {
                tracing::info!(movie_id = %id, "Movie deleted");
                Ok(())
            }
            WriteOutcome::ConditionFailed => Err(AppError::NotFound(id.to_string())),
        }
    }
}

fn require_id(id: &str) -> AppResult<()> {
    if id.is_empty() {
        return Err(AppError::validation("Missing required id parameter."));
    }
    Ok(())
}

/// Every field except the id is required and must be non-zero. Missing keys
/// are already rejected by deserialization; here a present field holding its
/// zero value counts as missing. Negative numbers are accepted.
fn validate_fields(movie: &Movie) -> AppResult<()> {
    let missing = if movie.title.trim().is_empty() {
        Some(item::TITLE)
    } else if movie.budget == 0 {
        Some(item::BUDGET)
    } else if release_date::is_zero(&movie.release_date) {
        Some(item::RELEASE_DATE)
    } else if movie.revenue == 0 {
        Some(item::REVENUE)
    } else if movie.runtime == 0 {
        Some(item::RUNTIME)
    } else if movie.vote_average == 0.0 {
        Some(item::VOTE_AVERAGE)
    } else if movie.vote_count == 0 {
        Some(item::VOTE_COUNT)
    } else {
        None
    };

    match missing {
        Some(field) => Err(AppError::validation(format!("Missing {} property", field))),
        None => Ok(()),
    }
}
