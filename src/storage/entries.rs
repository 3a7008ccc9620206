use chrono::{DateTime, Utc};
use migration::entities::{EntryEntity, entry};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};

use super::BlogStorage;
use crate::errors::Result;

impl BlogStorage {
    /// 按发布时间倒序列出文章；`limit` 为 None 时返回全部
    pub async fn list_recent_entries(&self, limit: Option<u64>) -> Result<Vec<entry::Model>> {
        let mut query = EntryEntity::find().order_by_desc(entry::Column::PostedAt);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let entries = query.all(&self.db).await?;
        Ok(entries)
    }

    pub async fn find_entry(&self, id: i64) -> Result<Option<entry::Model>> {
        let found = EntryEntity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn insert_entry(
        &self,
        title: &str,
        body: &str,
        posted_at: DateTime<Utc>,
    ) -> Result<entry::Model> {
        let active = entry::ActiveModel {
            title: Set(title.to_string()),
            body: Set(body.to_string()),
            posted_at: Set(posted_at),
            ..Default::default()
        };
        let model = active.insert(&self.db).await?;
        Ok(model)
    }
}
