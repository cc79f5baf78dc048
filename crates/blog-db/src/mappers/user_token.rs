//! Refresh token entity <-> model mapper

use blog_core::entities::RefreshToken;
use blog_core::value_objects::UserId;

use crate::models::UserTokenModel;

impl From<UserTokenModel> for RefreshToken {
    fn from(model: UserTokenModel) -> Self {
        RefreshToken {
            token: model.token,
            user_id: UserId::from_trusted(model.user_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
