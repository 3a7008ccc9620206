use std::sync::Arc;

use chrono::Utc;
use migration::entities::{comment, entry};
use tracing::info;

use crate::errors::{QuillpostError, Result};
use crate::storage::BlogStorage;

/// 文章读写
pub struct EntryService {
    storage: Arc<BlogStorage>,
}

impl EntryService {
    pub fn new(storage: Arc<BlogStorage>) -> Self {
        Self { storage }
    }

    /// 发布新文章，发布时间取当前时刻
    pub async fn publish(&self, title: &str, body: &str) -> Result<entry::Model> {
        let entry = self
            .storage
            .insert_entry(title.trim(), body, Utc::now())
            .await?;
        info!("Published entry {} ({})", entry.id, entry.title);
        Ok(entry)
    }

    pub async fn recent(&self, limit: Option<u64>) -> Result<Vec<entry::Model>> {
        self.storage.list_recent_entries(limit).await
    }

    /// 文章详情；不存在时返回 NotFound
    pub async fn get(&self, id: i64) -> Result<entry::Model> {
        self.storage
            .find_entry(id)
            .await?
            .ok_or_else(|| QuillpostError::not_found(format!("entry {} does not exist", id)))
    }

    pub async fn get_with_comments(&self, id: i64) -> Result<(entry::Model, Vec<comment::Model>)> {
        let entry = self.get(id).await?;
        let comments = self.storage.list_comments_for_entry(id).await?;
        Ok((entry, comments))
    }
}
