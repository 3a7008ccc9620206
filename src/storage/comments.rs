use chrono::{DateTime, Utc};
use migration::entities::{CommentEntity, comment};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::BlogStorage;
use crate::errors::{QuillpostError, Result};

impl BlogStorage {
    /// 某篇文章下的评论，按发布时间正序
    pub async fn list_comments_for_entry(&self, entry_id: i64) -> Result<Vec<comment::Model>> {
        let comments = CommentEntity::find()
            .filter(comment::Column::EntryId.eq(entry_id))
            .order_by_asc(comment::Column::PostedAt)
            .all(&self.db)
            .await?;
        Ok(comments)
    }

    /// 插入评论；父文章不存在时返回 NotFound，不依赖外键报错文案
    pub async fn insert_comment(
        &self,
        entry_id: i64,
        user_id: i64,
        name: &str,
        body: &str,
        posted_at: DateTime<Utc>,
    ) -> Result<comment::Model> {
        if self.find_entry(entry_id).await?.is_none() {
            return Err(QuillpostError::not_found(format!(
                "entry {} does not exist",
                entry_id
            )));
        }

        let active = comment::ActiveModel {
            entry_id: Set(entry_id),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            body: Set(body.to_string()),
            posted_at: Set(posted_at),
            ..Default::default()
        };
        let model = active.insert(&self.db).await?;
        Ok(model)
    }
}
