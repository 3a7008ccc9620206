use std::sync::Arc;

use chrono::Utc;
use migration::entities::comment;
use tracing::info;

use crate::errors::Result;
use crate::storage::BlogStorage;

/// 评论发布
pub struct CommentService {
    storage: Arc<BlogStorage>,
}

impl CommentService {
    pub fn new(storage: Arc<BlogStorage>) -> Self {
        Self { storage }
    }

    /// 发布评论；作者字段来自会话，发布时间取当前时刻
    pub async fn post(
        &self,
        entry_id: i64,
        user_id: i64,
        name: &str,
        body: &str,
    ) -> Result<comment::Model> {
        let comment = self
            .storage
            .insert_comment(entry_id, user_id, name, body.trim(), Utc::now())
            .await?;
        info!("New comment {} on entry {}", comment.id, entry_id);
        Ok(comment)
    }
}
