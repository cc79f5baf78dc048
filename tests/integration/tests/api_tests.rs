//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//! - For the Redis store tests, additionally REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_redis_env, check_test_env, fixtures::*,
    redis_test_config, refresh_cookie_value, TestServer,
};
use reqwest::StatusCode;

async fn signup(server: &TestServer) -> RegisterRequest {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/user/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
    request
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_signup_duplicate() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;

    let response = server.post("/api/v1/user/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_public_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;

    let response = server
        .get(&format!("/api/v1/user/{}", request.user_id))
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(user.user_id, request.user_id);
    assert_eq!(user.user_nickname, request.user_nickname);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_login_by_id_and_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;

    let response = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    assert!(refresh_cookie_value(&response).is_some());
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.user_id, request.user_id);
    assert!(auth.access_token_expire_date > chrono::Utc::now().timestamp_millis());

    let response = server
        .post("/api/v1/user/login", &LoginRequest::by_email(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.user_email, request.user_email);

    let me = server.get_auth("/api/v1/user/me", &auth.access_token).await.unwrap();
    let user: UserResponse = assert_json(me, StatusCode::OK).await.unwrap();
    assert_eq!(user.user_id, request.user_id);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;

    let response = server
        .post(
            "/api/v1/user/login",
            &LoginRequest::by_id(&request).with_password("wrong123"),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
    assert_eq!(body.error.message, "Invalid credentials");
}

#[tokio::test]
async fn test_refresh_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;

    let login = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    let first = refresh_cookie_value(&login).expect("refresh cookie");

    // The cookie store presents the current cookie
    let response = server.post_empty("/api/v1/user/refresh").await.unwrap();
    let second = refresh_cookie_value(&response).expect("rotated cookie");
    assert_ne!(first, second);
    let _: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // The consumed token is rejected
    let replay = server.refresh_with(&first).await.unwrap();
    let body: ErrorBody = assert_json(replay, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REFRESH_TOKEN");

    // The rotated one still works
    let response = server.refresh_with(&second).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;
    let login = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    let token = refresh_cookie_value(&login).expect("refresh cookie");

    let (a, b, c, d) = tokio::join!(
        server.refresh_with(&token),
        server.refresh_with(&token),
        server.refresh_with(&token),
        server.refresh_with(&token),
    );
    let winners = [a, b, c, d]
        .into_iter()
        .map(|r| r.unwrap().status())
        .filter(|s| *s == StatusCode::OK)
        .count();

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;
    let login = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    let token = refresh_cookie_value(&login).expect("refresh cookie");
    let auth: AuthResponse = assert_json(login, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/api/v1/user/logout", &auth.access_token)
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(message.message, "Logged out");

    let response = server.refresh_with(&token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    // Logging out again is harmless
    let response = server
        .post_auth("/api/v1/user/logout", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_password_change_revokes_sessions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = signup(&server).await;
    let login = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    let token = refresh_cookie_value(&login).expect("refresh cookie");
    let auth: AuthResponse = assert_json(login, StatusCode::OK).await.unwrap();

    let change = ChangePasswordRequest {
        current_password: TEST_PASSWORD.to_string(),
        new_password: "changed456".to_string(),
    };
    let response = server
        .put_auth("/api/v1/user/password", &auth.access_token, &change)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.refresh_with(&token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/api/v1/user/login",
            &LoginRequest::by_id(&request).with_password("changed456"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_protected_route_without_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/user/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Redis Token Store
// ============================================================================

#[tokio::test]
async fn test_redis_store_rotation() {
    if !check_redis_env().await {
        return;
    }

    let config = redis_test_config().unwrap();
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let request = signup(&server).await;

    let login = server
        .post("/api/v1/user/login", &LoginRequest::by_id(&request))
        .await
        .unwrap();
    let token = refresh_cookie_value(&login).expect("refresh cookie");

    let (a, b) = tokio::join!(server.refresh_with(&token), server.refresh_with(&token));
    let statuses = [a.unwrap().status(), b.unwrap().status()];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1
    );

    let replay = server.refresh_with(&token).await.unwrap();
    assert_status(replay, StatusCode::UNAUTHORIZED).await.unwrap();
}
