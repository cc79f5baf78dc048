//! Session handlers
//!
//! Login, refresh and logout. The refresh token only ever travels in the
//! `refreshToken` cookie.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use blog_common::AppError;
use blog_service::dto::{AuthResponse, LoginRequest, MessageResponse};
use blog_service::{AuthService, LoginCredentials};

use crate::cookies::{clear_refresh_token, refresh_token, set_refresh_token};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Login with a user ID or email and a password
///
/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let credentials = LoginCredentials::from(request);
    let session = AuthService::new(state.service_context())
        .login(&credentials)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let jar = set_refresh_token(jar, state.cookie_policy(), session.refresh_token.clone());
    Ok((jar, Json(AuthResponse::from(&session))))
}

/// Rotate the refresh token cookie and issue a new access token
///
/// POST /user/refresh
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let presented = refresh_token(&jar);
    let policy = state.cookie_policy();

    match AuthService::new(state.service_context())
        .refresh(presented.as_deref())
        .await
    {
        Ok(Some(session)) => {
            let jar = set_refresh_token(jar, policy, session.refresh_token.clone());
            (jar, Json(AuthResponse::from(&session))).into_response()
        }
        Ok(None) => (
            clear_refresh_token(jar, policy),
            ApiError::from(AppError::InvalidRefreshToken),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Revoke the presented refresh token and clear its cookie
///
/// POST /user/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let presented = refresh_token(&jar);
    AuthService::new(state.service_context())
        .logout(&auth.user_id, presented.as_deref())
        .await?;

    let jar = clear_refresh_token(jar, state.cookie_policy());
    Ok((jar, Json(MessageResponse::new("Logged out"))))
}
