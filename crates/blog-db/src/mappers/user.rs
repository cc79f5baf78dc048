//! User entity <-> model mapper

use blog_core::entities::User;
use blog_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_trusted(model.id),
            email: model.email,
            nickname: model.nickname,
            thumbnail_url: model.thumbnail_url,
            blog_name: model.blog_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
