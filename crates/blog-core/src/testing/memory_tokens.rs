use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::entities::RefreshToken;
use crate::traits::{RepoResult, TokenRepository};
use crate::value_objects::UserId;

/// [`TokenRepository`] over a mutex-guarded map
///
/// Every operation runs under the lock, so `rotate` is atomic per token.
#[derive(Debug, Default)]
pub struct MemoryTokenRepository {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.lock().contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.lock().is_empty()
    }

    /// Tokens currently held by `user_id`
    pub fn count_for_user(&self, user_id: &UserId) -> usize {
        self.tokens
            .lock()
            .values()
            .filter(|t| &t.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn insert(&self, token: &RefreshToken) -> RepoResult<()> {
        self.tokens.lock().insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        Ok(self.tokens.lock().get(token).cloned())
    }

    async fn delete_by_token_and_user(&self, token: &str, user_id: &UserId) -> RepoResult<bool> {
        let mut tokens = self.tokens.lock();
        match tokens.get(token) {
            Some(stored) if &stored.user_id == user_id => {
                tokens.remove(token);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn rotate(
        &self,
        token: &str,
        user_id: &UserId,
        replacement: &RefreshToken,
    ) -> RepoResult<Option<RefreshToken>> {
        let mut tokens = self.tokens.lock();
        let owned = tokens.get(token).is_some_and(|t| &t.user_id == user_id);
        if !owned {
            return Ok(None);
        }
        let consumed = tokens.remove(token);
        tokens.insert(replacement.token.clone(), replacement.clone());
        Ok(consumed)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let mut tokens = self.tokens.lock();
        let before = tokens.len();
        tokens.retain(|_, t| &t.user_id != user_id);
        Ok((before - tokens.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let mut tokens = self.tokens.lock();
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired_at(now));
        Ok((before - tokens.len()) as u64)
    }
}
