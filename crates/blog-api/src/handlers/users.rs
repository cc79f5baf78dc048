//! User handlers
//!
//! Endpoints for registration, profile lookup and the caller's own account.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use blog_core::UserId;
use blog_service::dto::{
    ChangePasswordRequest, MessageResponse, RegisterRequest, UpdateEmailRequest,
    UpdateProfileRequest, UserLookupQuery, UserResponse,
};
use blog_service::UserService;

use crate::cookies::clear_refresh_token;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /user/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let user = UserService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(UserResponse::from(&user))))
}

/// Get the authenticated user
///
/// GET /user/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context())
        .get_user(&auth.user_id)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Get a user's public profile
///
/// With `?email=` the user is only returned if that address is theirs.
///
/// GET /user/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<UserLookupQuery>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = UserId::parse(user_id).map_err(|e| ApiError::invalid_path(e.to_string()))?;
    let user = UserService::new(state.service_context())
        .find_user(&user_id, query.email.as_deref())
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Change the authenticated user's password
///
/// Every refresh token of the user is revoked, including this client's.
///
/// PUT /user/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    UserService::new(state.service_context())
        .change_password(&auth.user_id, request)
        .await?;

    let jar = clear_refresh_token(jar, state.cookie_policy());
    Ok((jar, Json(MessageResponse::new("Password changed"))))
}

/// PUT /user/email
pub async fn update_email(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateEmailRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context())
        .update_email(&auth.user_id, request)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::new(state.service_context())
        .update_profile(&auth.user_id, request)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// Delete the authenticated user's account and end every session
///
/// DELETE /user/me
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    UserService::new(state.service_context())
        .delete_account(&auth.user_id)
        .await?;

    let jar = clear_refresh_token(jar, state.cookie_policy());
    Ok((jar, Json(MessageResponse::new("Account deleted"))))
}
