//! Bearer token verification for authenticated routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use blog_common::AppError;
use blog_service::AuthService;

use crate::extractors::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;

/// Verify the access token and attach the caller's identity to the request
///
/// Missing, malformed and expired tokens all end the request with 401.
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::MissingAuth)?;

    let claims = AuthService::new(state.service_context())
        .verify_access_token(bearer.token())
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            ApiError::from(e)
        })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Invalid user ID in token");
        ApiError::from(AppError::InvalidToken)
    })?;

    request
        .extensions_mut()
        .insert(AuthUser::new(user_id, claims.email));

    Ok(next.run(request).await)
}
