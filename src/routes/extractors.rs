// ============================================================================
// Request Extractors
// ============================================================================
//
// - bearer_token: pulls the token out of the Authorization header
// - MovieId: path id with rejections mapped to AppError
// - MovieBody: JSON body with rejections mapped to AppError
//
// ============================================================================

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    Json,
};
use movies_error::AppError;

use crate::models::Movie;

/// Token from an `Authorization: Bearer <token>` header
///
/// The scheme must be exactly `Bearer` followed by one space and a
/// non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::auth("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AppError::auth("Invalid Authorization header format"))?;

    if token.is_empty() {
        return Err(AppError::auth("Empty bearer token"));
    }
    Ok(token)
}

/// Movie id taken from the request path
#[derive(Debug, Clone)]
pub struct MovieId(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(MovieId(id))
    }
}

/// Movie decoded from a JSON request body
///
/// Malformed JSON, a missing field or a wrong content type all become a 400
/// validation error with the JSON error envelope.
#[derive(Debug)]
pub struct MovieBody(pub Movie);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for MovieBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(movie) = Json::<Movie>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| AppError::validation(e.body_text()))?;
        Ok(MovieBody(movie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AppError::Auth(_))));
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(bearer_token(&headers("Basic abc")), Err(AppError::Auth(_))));
        assert!(matches!(bearer_token(&headers("bearer abc")), Err(AppError::Auth(_))));
        assert!(matches!(bearer_token(&headers("xBearer abc")), Err(AppError::Auth(_))));
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(matches!(bearer_token(&headers("Bearer ")), Err(AppError::Auth(_))));
        assert!(matches!(bearer_token(&headers("Bearer   ")), Err(AppError::Auth(_))));
    }
}
