//! Authentication service
//!
//! Turns a password or a refresh token into a fresh [`Session`], and revokes
//! refresh tokens on logout. Rejections (bad credentials, unknown, expired or
//! already-consumed refresh tokens) are `Ok(None)`; only store, hashing and
//! signing failures surface as errors.

use blog_common::auth::generate_refresh_token_value;
use blog_core::entities::{AccessClaims, RefreshToken, SignedAccessToken, User};
use blog_core::UserId;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Credentials presented at login
///
/// With a user ID the lookup is by ID, narrowed by email when one is also
/// given. With only an email the lookup is by email.
#[derive(Clone, Default)]
pub struct LoginCredentials {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginCredentials {
    pub fn with_user_id(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            email: None,
            password: password.into(),
        }
    }

    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: None,
            email: Some(email.into()),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Access token, refresh token and the public user they belong to
#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub user: User,
}

impl Session {
    fn new(access: SignedAccessToken, refresh: RefreshToken, user: User) -> Self {
        Self {
            access_token: access.token,
            access_token_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_token_expires_at: refresh.expires_at,
            user,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user.id)
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish_non_exhaustive()
    }
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with a user ID or email and a password
    #[instrument(skip(self, credentials), fields(user_id = ?credentials.user_id))]
    pub async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<Option<Session>> {
        let hasher = self.ctx.hasher();

        let Some(user) = self.resolve_user(credentials).await? else {
            hasher.verify_decoy(&credentials.password);
            warn!("Login failed: invalid credentials");
            return Ok(None);
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(&user.id).await? else {
            hasher.verify_decoy(&credentials.password);
            warn!("Login failed: invalid credentials");
            return Ok(None);
        };

        if !hasher.verify(&credentials.password, &password_hash)? {
            warn!("Login failed: invalid credentials");
            return Ok(None);
        }

        let access = self.ctx.signer().sign(&user)?;
        let refresh = self.generate_refresh_token(&user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok(Some(Session::new(access, refresh, user)))
    }

    /// Exchange a refresh token for a new session, consuming the token
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> ServiceResult<Option<Session>> {
        let Some(value) = refresh_token.filter(|t| !t.is_empty()) else {
            debug!("Refresh rejected: no token presented");
            return Ok(None);
        };

        let tokens = self.ctx.token_repo();

        let Some(record) = tokens.find_by_token(value).await? else {
            debug!("Refresh rejected: unknown token");
            return Ok(None);
        };

        let now = Utc::now();
        if record.is_expired_at(now) {
            tokens.delete_by_token_and_user(value, &record.user_id).await?;
            debug!(user_id = %record.user_id, "Refresh rejected: token expired");
            return Ok(None);
        }

        let Some(user) = self.ctx.user_repo().find_by_id(&record.user_id).await? else {
            tokens.delete_by_token_and_user(value, &record.user_id).await?;
            warn!(user_id = %record.user_id, "Refresh rejected: token owner no longer exists");
            return Ok(None);
        };

        let access = self.ctx.signer().sign(&user)?;
        let replacement = self.new_refresh_token(&user.id, now);

        if tokens.rotate(value, &user.id, &replacement).await?.is_none() {
            warn!(user_id = %user.id, "Refresh rejected: token already consumed");
            return Ok(None);
        }

        info!(user_id = %user.id, "Tokens refreshed successfully");
        Ok(Some(Session::new(access, replacement, user)))
    }

    /// Revoke `caller`'s refresh token
    ///
    /// Only a token owned by `caller` is deleted. Absent, unknown and foreign
    /// tokens are left alone and still count as a successful logout.
    #[instrument(skip(self, refresh_token), fields(user_id = %caller))]
    pub async fn logout(&self, caller: &UserId, refresh_token: Option<&str>) -> ServiceResult<()> {
        let Some(value) = refresh_token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        if self
            .ctx
            .token_repo()
            .delete_by_token_and_user(value, caller)
            .await?
        {
            info!("User logged out successfully");
        } else {
            debug!("Logout left no token to revoke");
        }

        Ok(())
    }

    /// Revoke every refresh token held by a user
    #[instrument(skip(self))]
    pub async fn logout_all(&self, user_id: &UserId) -> ServiceResult<u64> {
        let count = self.ctx.token_repo().delete_all_for_user(user_id).await?;
        info!(user_id = %user_id, count, "Revoked all sessions");
        Ok(count)
    }

    /// Generate, persist and return a refresh token for a user
    #[instrument(skip(self))]
    pub async fn generate_refresh_token(&self, user_id: &UserId) -> ServiceResult<RefreshToken> {
        let token = self.new_refresh_token(user_id, Utc::now());
        self.ctx.token_repo().insert(&token).await?;
        Ok(token)
    }

    /// Verify an access token's signature and expiry
    pub fn verify_access_token(&self, token: &str) -> ServiceResult<AccessClaims> {
        Ok(self.ctx.signer().verify(token)?)
    }

    /// Delete every refresh token whose expiry has passed
    #[instrument(skip(self))]
    pub async fn purge_expired_tokens(&self) -> ServiceResult<u64> {
        let count = self.ctx.token_repo().delete_expired(Utc::now()).await?;
        if count > 0 {
            info!(count, "Purged expired refresh tokens");
        }
        Ok(count)
    }

    async fn resolve_user(&self, credentials: &LoginCredentials) -> ServiceResult<Option<User>> {
        let users = self.ctx.user_repo();
        let email = credentials.email.as_deref().filter(|e| !e.is_empty());

        match credentials.user_id.as_deref().filter(|id| !id.is_empty()) {
            Some(raw_id) => {
                let Ok(user_id) = UserId::parse(raw_id) else {
                    return Ok(None);
                };
                let user = match email {
                    Some(email) => users.find_by_id_and_email(&user_id, email).await?,
                    None => users.find_by_id(&user_id).await?,
                };
                Ok(user)
            }
            None => match email {
                Some(email) => Ok(users.find_by_email(email).await?),
                None => Ok(None),
            },
        }
    }

    fn new_refresh_token(&self, user_id: &UserId, now: DateTime<Utc>) -> RefreshToken {
        RefreshToken::issue(
            generate_refresh_token_value(),
            user_id.clone(),
            now,
            self.ctx.settings().refresh_token_ttl(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use blog_common::{Argon2Hasher, JwtService};
    use blog_core::testing::{MemoryTokenRepository, MemoryUserRepository};
    use blog_core::traits::{CredentialHasher, TokenRepository, UserRepository};
    use blog_core::{DomainError, NewUser, RepoResult};
    use chrono::Duration;
    use tokio::sync::Barrier;

    use crate::services::context::{ServiceContextBuilder, SessionSettings};

    const SECRET: &str = "test-secret";

    /// Cheap stand-in for Argon2 that counts verifications
    #[derive(Default)]
    struct CountingHasher {
        verifications: AtomicUsize,
    }

    impl CountingHasher {
        fn verifications(&self) -> usize {
            self.verifications.load(Ordering::SeqCst)
        }
    }

    impl CredentialHasher for CountingHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("plain${password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            self.verifications.fetch_add(1, Ordering::SeqCst);
            Ok(hash == format!("plain${password}"))
        }

        fn verify_decoy(&self, _password: &str) {
            self.verifications.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Token store whose lookups wait until two callers have both looked up
    struct GatedTokens {
        inner: MemoryTokenRepository,
        gate: Barrier,
    }

    #[async_trait]
    impl TokenRepository for GatedTokens {
        async fn insert(&self, token: &RefreshToken) -> RepoResult<()> {
            self.inner.insert(token).await
        }

        async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
            let found = self.inner.find_by_token(token).await?;
            self.gate.wait().await;
            Ok(found)
        }

        async fn delete_by_token_and_user(&self, token: &str, user_id: &UserId) -> RepoResult<bool> {
            self.inner.delete_by_token_and_user(token, user_id).await
        }

        async fn rotate(
            &self,
            token: &str,
            user_id: &UserId,
            replacement: &RefreshToken,
        ) -> RepoResult<Option<RefreshToken>> {
            self.inner.rotate(token, user_id, replacement).await
        }

        async fn delete_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
            self.inner.delete_all_for_user(user_id).await
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
            self.inner.delete_expired(now).await
        }
    }

    struct Fixture {
        ctx: ServiceContext,
        users: Arc<MemoryUserRepository>,
        tokens: Arc<MemoryTokenRepository>,
        hasher: Arc<CountingHasher>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MemoryUserRepository::new());
        let tokens = Arc::new(MemoryTokenRepository::new());
        let hasher = Arc::new(CountingHasher::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .token_repo(tokens.clone())
            .hasher(hasher.clone())
            .signer(Arc::new(JwtService::new(SECRET, 3600)))
            .build()
            .unwrap();
        Fixture {
            ctx,
            users,
            tokens,
            hasher,
        }
    }

    async fn seed_user(
        users: &MemoryUserRepository,
        hasher: &dyn CredentialHasher,
        id: &str,
        email: &str,
        password: &str,
    ) -> User {
        let new_user = NewUser::new(UserId::parse(id).unwrap(), email, id);
        let hash = hasher.hash(password).unwrap();
        users.create(&new_user, &hash).await.unwrap()
    }

    fn uid(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn test_login_and_refresh_scenario_with_argon2() {
        let users = Arc::new(MemoryUserRepository::new());
        let tokens = Arc::new(MemoryTokenRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .token_repo(tokens.clone())
            .hasher(hasher.clone())
            .signer(Arc::new(JwtService::new(SECRET, 3600)))
            .build()
            .unwrap();
        seed_user(&users, hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&ctx);

        let session = auth
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .expect("valid credentials");

        assert_eq!(session.user.id.as_str(), "u1");
        assert_eq!(session.refresh_token.len(), 96);
        assert!(tokens.contains(&session.refresh_token));

        let claims = auth.verify_access_token(&session.access_token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "u1@example.com");

        let rotated = auth
            .refresh(Some(&session.refresh_token))
            .await
            .unwrap()
            .expect("fresh refresh token");

        assert_ne!(rotated.refresh_token, session.refresh_token);
        assert!(!tokens.contains(&session.refresh_token));
        assert!(tokens.contains(&rotated.refresh_token));

        // The consumed token is single use
        assert!(auth.refresh(Some(&session.refresh_token)).await.unwrap().is_none());

        let wrong = auth
            .login(&LoginCredentials::with_user_id("u1", "wrong"))
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_login_refresh_token_expiry_window() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let before = Utc::now();
        let session = auth
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .unwrap();
        let after = Utc::now();

        assert!(session.refresh_token_expires_at >= before + Duration::days(14));
        assert!(session.refresh_token_expires_at <= after + Duration::days(14));
        assert!(session.access_token_expires_at > before);
    }

    #[tokio::test]
    async fn test_login_by_email_and_by_id_with_email() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let by_email = auth
            .login(&LoginCredentials::with_email("u1@example.com", "secret123"))
            .await
            .unwrap();
        assert!(by_email.is_some());

        let mut both = LoginCredentials::with_user_id("u1", "secret123");
        both.email = Some("u1@example.com".to_string());
        assert!(auth.login(&both).await.unwrap().is_some());

        both.email = Some("other@example.com".to_string());
        assert!(auth.login(&both).await.unwrap().is_none());

        let neither = LoginCredentials {
            password: "secret123".to_string(),
            ..Default::default()
        };
        assert!(auth.login(&neither).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let wrong_password = auth
            .login(&LoginCredentials::with_user_id("u1", "nope"))
            .await
            .unwrap();
        assert!(wrong_password.is_none());
        assert_eq!(f.hasher.verifications(), 1);

        let unknown_user = auth
            .login(&LoginCredentials::with_user_id("ghost", "secret123"))
            .await
            .unwrap();
        assert!(unknown_user.is_none());
        assert_eq!(f.hasher.verifications(), 2);

        let malformed_id = auth
            .login(&LoginCredentials::with_user_id("not valid!", "secret123"))
            .await
            .unwrap();
        assert!(malformed_id.is_none());
        assert_eq!(f.hasher.verifications(), 3);

        assert!(f.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_each_login_issues_a_distinct_token() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);
        let creds = LoginCredentials::with_user_id("u1", "secret123");

        let mut seen = HashSet::new();
        for _ in 0..20 {
            let session = auth.login(&creds).await.unwrap().unwrap();
            assert!(seen.insert(session.refresh_token));
        }
        assert_eq!(f.tokens.count_for_user(&uid("u1")), 20);
    }

    #[tokio::test]
    async fn test_refresh_without_token() {
        let f = fixture();
        let auth = AuthService::new(&f.ctx);

        assert!(auth.refresh(None).await.unwrap().is_none());
        assert!(auth.refresh(Some("")).await.unwrap().is_none());
        assert!(auth.refresh(Some("does-not-exist")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_expired_token_is_removed() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let stale = RefreshToken::issue(
            "stale".to_string(),
            uid("u1"),
            Utc::now() - Duration::days(15),
            Duration::days(14),
        );
        f.tokens.insert(&stale).await.unwrap();

        assert!(auth.refresh(Some("stale")).await.unwrap().is_none());
        assert!(!f.tokens.contains("stale"));
    }

    #[tokio::test]
    async fn test_refresh_token_expiring_now_is_rejected() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let now = Utc::now();
        let edge = RefreshToken::issue("edge".to_string(), uid("u1"), now, Duration::zero());
        f.tokens.insert(&edge).await.unwrap();

        assert!(auth.refresh(Some("edge")).await.unwrap().is_none());
        assert!(!f.tokens.contains("edge"));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_user_removes_token() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let session = auth
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .unwrap();
        assert!(f.users.remove(&uid("u1")));

        assert!(auth.refresh(Some(&session.refresh_token)).await.unwrap().is_none());
        assert!(!f.tokens.contains(&session.refresh_token));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_has_exactly_one_winner() {
        let users = Arc::new(MemoryUserRepository::new());
        let tokens = Arc::new(GatedTokens {
            inner: MemoryTokenRepository::new(),
            gate: Barrier::new(2),
        });
        let hasher = Arc::new(CountingHasher::default());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .token_repo(tokens.clone())
            .hasher(hasher.clone())
            .signer(Arc::new(JwtService::new(SECRET, 3600)))
            .build()
            .unwrap();
        seed_user(&users, hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&ctx);

        let session = auth
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .unwrap();

        // Both callers see the token before either rotates it
        let (a, b) = tokio::join!(
            auth.refresh(Some(&session.refresh_token)),
            auth.refresh(Some(&session.refresh_token)),
        );
        let winners: Vec<Session> = [a.unwrap(), b.unwrap()].into_iter().flatten().collect();

        assert_eq!(winners.len(), 1);
        assert!(!tokens.inner.contains(&session.refresh_token));
        assert!(tokens.inner.contains(&winners[0].refresh_token));
        assert_eq!(tokens.inner.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refresh_across_tasks() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let session = AuthService::new(&f.ctx)
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let ctx = f.ctx.clone();
            let token = session.refresh_token.clone();
            handles.push(tokio::spawn(async move {
                AuthService::new(&ctx).refresh(Some(&token)).await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(f.tokens.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let session = auth
            .login(&LoginCredentials::with_user_id("u1", "secret123"))
            .await
            .unwrap()
            .unwrap();

        let u1 = uid("u1");
        auth.logout(&u1, Some(&session.refresh_token)).await.unwrap();
        assert!(!f.tokens.contains(&session.refresh_token));

        auth.logout(&u1, Some(&session.refresh_token)).await.unwrap();
        auth.logout(&u1, Some("never-issued")).await.unwrap();
        auth.logout(&u1, Some("")).await.unwrap();
        auth.logout(&u1, None).await.unwrap();

        assert!(auth.refresh(Some(&session.refresh_token)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_cannot_revoke_another_users_token() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "alice", "alice@example.com", "secret123").await;
        seed_user(&f.users, f.hasher.as_ref(), "bob", "bob@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        let alice = auth
            .login(&LoginCredentials::with_user_id("alice", "secret123"))
            .await
            .unwrap()
            .unwrap();

        auth.logout(&uid("bob"), Some(&alice.refresh_token))
            .await
            .unwrap();
        assert!(f.tokens.contains(&alice.refresh_token));

        // Alice's session still refreshes
        assert!(auth.refresh(Some(&alice.refresh_token)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_logout_all() {
        let f = fixture();
        seed_user(&f.users, f.hasher.as_ref(), "u1", "u1@example.com", "secret123").await;
        seed_user(&f.users, f.hasher.as_ref(), "u2", "u2@example.com", "secret123").await;
        let auth = AuthService::new(&f.ctx);

        for _ in 0..3 {
            auth.generate_refresh_token(&uid("u1")).await.unwrap();
        }
        let other = auth.generate_refresh_token(&uid("u2")).await.unwrap();

        assert_eq!(auth.logout_all(&uid("u1")).await.unwrap(), 3);
        assert_eq!(f.tokens.count_for_user(&uid("u1")), 0);
        assert!(f.tokens.contains(&other.token));
    }

    #[tokio::test]
    async fn test_purge_expired_tokens() {
        let f = fixture();
        let auth = AuthService::new(&f.ctx);
        let now = Utc::now();

        for i in 0..3 {
            let stale = RefreshToken::issue(
                format!("stale-{i}"),
                uid("u1"),
                now - Duration::days(30),
                Duration::days(14),
            );
            f.tokens.insert(&stale).await.unwrap();
        }
        let live = auth.generate_refresh_token(&uid("u1")).await.unwrap();

        assert_eq!(auth.purge_expired_tokens().await.unwrap(), 3);
        assert_eq!(f.tokens.len(), 1);
        assert!(f.tokens.contains(&live.token));
    }

    #[tokio::test]
    async fn test_custom_refresh_ttl() {
        let users = Arc::new(MemoryUserRepository::new());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users)
            .token_repo(Arc::new(MemoryTokenRepository::new()))
            .hasher(Arc::new(CountingHasher::default()))
            .signer(Arc::new(JwtService::new(SECRET, 3600)))
            .settings(SessionSettings::new(1))
            .build()
            .unwrap();

        let now = Utc::now();
        let token = AuthService::new(&ctx)
            .generate_refresh_token(&uid("u1"))
            .await
            .unwrap();
        assert!(token.expires_at <= Utc::now() + Duration::days(1));
        assert!(token.expires_at >= now + Duration::days(1));
    }

    #[test]
    fn test_verify_access_token_rejects_garbage() {
        let f = fixture();
        let err = AuthService::new(&f.ctx)
            .verify_access_token("not-a-jwt")
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = LoginCredentials::with_user_id("u1", "secret123");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("secret123"));
    }
}
