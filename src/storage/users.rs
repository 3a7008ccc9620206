use chrono::{DateTime, Utc};
use migration::entities::{UserEntity, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use super::BlogStorage;
use crate::errors::Result;

impl BlogStorage {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let found = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<user::Model>> {
        let found = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<user::Model> {
        let active = user::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(created_at),
            ..Default::default()
        };
        let model = active.insert(&self.db).await?;
        Ok(model)
    }
}
