// ============================================================================
// Axum Middleware
// ============================================================================
//
// - require_bearer_auth: reject requests without a verified bearer token
//
// ============================================================================

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use movies_error::AppError;
use std::sync::Arc;

use crate::context::AppContext;
use crate::routes::extractors::bearer_token;

/// Authentication gate
///
/// Runs before routing, so a rejected request never reaches a handler or the
/// store. Every failure produces the same 401 body; the reason is only
/// logged.
pub async fn require_bearer_auth(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?.to_string();

    if let Err(e) = ctx.verifier.verify(&token).await {
        return Err(AppError::auth(format!("Token rejected: {:#}", e)));
    }

    Ok(next.run(req).await)
}
