use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::entities::{NewUser, User};
use crate::error::DomainError;
use crate::traits::{RepoResult, UserRepository};
use crate::value_objects::UserId;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// [`UserRepository`] over a concurrent map
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<UserId, StoredUser>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a user outright, leaving any of their tokens orphaned
    pub fn remove(&self, id: &UserId) -> bool {
        self.users.remove(id).is_some()
    }

    fn modify(&self, id: &UserId, change: impl FnOnce(&mut User)) -> RepoResult<User> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::UserNotFound(id.clone()))?;
        change(&mut entry.user);
        entry.user.updated_at = Utc::now();
        Ok(entry.user.clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.user.clone()))
    }

    async fn find_by_id_and_email(&self, id: &UserId, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .get(id)
            .filter(|entry| entry.user.email == email)
            .map(|entry| entry.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.user.email == email)
            .map(|entry| entry.user.clone()))
    }

    async fn id_exists(&self, id: &UserId) -> RepoResult<bool> {
        Ok(self.users.contains_key(id))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.users.iter().any(|entry| entry.user.email == email))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        if self.email_exists(&user.email).await? {
            return Err(DomainError::EmailAlreadyExists);
        }
        match self.users.entry(user.id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(DomainError::UserIdAlreadyExists),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let created = user.clone().into_user(Utc::now());
                slot.insert(StoredUser {
                    user: created.clone(),
                    password_hash: password_hash.to_string(),
                });
                Ok(created)
            }
        }
    }

    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>> {
        Ok(self.users.get(id).map(|entry| entry.password_hash.clone()))
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> RepoResult<()> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::UserNotFound(id.clone()))?;
        entry.password_hash = password_hash.to_string();
        entry.user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_email(&self, id: &UserId, email: &str) -> RepoResult<User> {
        let taken = self
            .users
            .iter()
            .any(|entry| entry.key() != id && entry.user.email == email);
        if taken {
            return Err(DomainError::EmailAlreadyExists);
        }
        self.modify(id, |user| user.email = email.to_string())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        nickname: &str,
        blog_name: Option<&str>,
    ) -> RepoResult<User> {
        self.modify(id, |user| {
            user.nickname = nickname.to_string();
            user.blog_name = blog_name.map(str::to_string);
        })
    }

    async fn delete(&self, id: &UserId) -> RepoResult<bool> {
        Ok(self.remove(id))
    }
}
