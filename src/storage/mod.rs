//! sea-orm storage backend
//!
//! Owns the database connection, runs migrations at construction and exposes
//! the typed operations the services build on. Supports SQLite, MySQL/MariaDB
//! and PostgreSQL.

mod comments;
mod connection;
mod entries;
mod users;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{QuillpostError, Result};

pub use connection::{connect_generic, connect_sqlite, infer_backend_from_url, run_migrations};

/// 数据库存储门面
#[derive(Clone)]
pub struct BlogStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl BlogStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(QuillpostError::database_config(
                "database_url is not set".to_string(),
            ));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name).await?
        };

        let storage = BlogStorage { db, backend_name };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取底层连接（测试与关闭流程使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
