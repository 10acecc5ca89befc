// Movie <-> store item mapping. Attribute names match the JSON wire names so
// the persisted shape is the same one clients see.

use movies_error::{AppError, AppResult};
use std::str::FromStr;

use crate::models::movie::{release_date, Movie};
use crate::store::Item;

pub const MOVIE_ID: &str = "movie-id";
pub const TITLE: &str = "title";
pub const BUDGET: &str = "budget";
pub const RELEASE_DATE: &str = "release-date";
pub const REVENUE: &str = "revenue";
pub const RUNTIME: &str = "runtime";
pub const VOTE_AVERAGE: &str = "vote-average";
pub const VOTE_COUNT: &str = "vote-count";

pub fn to_item(movie: &Movie) -> Item {
    Item::from([
        (MOVIE_ID.to_string(), movie.movie_id.clone()),
        (TITLE.to_string(), movie.title.clone()),
        (BUDGET.to_string(), movie.budget.to_string()),
        (RELEASE_DATE.to_string(), release_date::format(&movie.release_date)),
        (REVENUE.to_string(), movie.revenue.to_string()),
        (RUNTIME.to_string(), movie.runtime.to_string()),
        // f64 Display is the shortest string that parses back to the same value
        (VOTE_AVERAGE.to_string(), movie.vote_average.to_string()),
        (VOTE_COUNT.to_string(), movie.vote_count.to_string()),
    ])
}

/// Decode a stored item
///
/// Returns `Ok(None)` when the item carries no movie id, which callers treat
/// as "not found". Any other missing or unparseable attribute is a
/// malformed item and surfaces as a store error.
pub fn from_item(item: &Item) -> AppResult<Option<Movie>> {
    let movie_id = match item.get(MOVIE_ID) {
        Some(id) if !id.is_empty() => id.clone(),
        _ => return Ok(None),
    };

    let release_date = release_date::parse(attribute(item, &movie_id, RELEASE_DATE)?)
        .map_err(|e| malformed(&movie_id, RELEASE_DATE, &e))?;

    Ok(Some(Movie {
        title: attribute(item, &movie_id, TITLE)?.to_string(),
        budget: parsed(item, &movie_id, BUDGET)?,
        release_date,
        revenue: parsed(item, &movie_id, REVENUE)?,
        runtime: parsed(item, &movie_id, RUNTIME)?,
        vote_average: parsed(item, &movie_id, VOTE_AVERAGE)?,
        vote_count: parsed(item, &movie_id, VOTE_COUNT)?,
        movie_id,
    }))
}

fn attribute<'a>(item: &'a Item, movie_id: &str, name: &str) -> AppResult<&'a str> {
    item.get(name)
        .map(String::as_str)
        .ok_or_else(|| malformed(movie_id, name, "attribute missing"))
}

fn parsed<T>(item: &Item, movie_id: &str, name: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    attribute(item, movie_id, name)?
        .parse()
        .map_err(|e: T::Err| malformed(movie_id, name, &e.to_string()))
}

fn malformed(movie_id: &str, name: &str, reason: &str) -> AppError {
    AppError::store(format!(
        "malformed item for movie '{}': {}: {}",
        movie_id, name, reason
    ))
}
