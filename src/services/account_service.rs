use std::sync::Arc;

use chrono::Utc;
use migration::entities::user;
use tracing::{info, warn};

use crate::errors::{QuillpostError, Result};
use crate::storage::BlogStorage;
use crate::utils::password::{hash_password, verify_password};

/// 账号注册与登录
pub struct AccountService {
    storage: Arc<BlogStorage>,
}

impl AccountService {
    pub fn new(storage: Arc<BlogStorage>) -> Self {
        Self { storage }
    }

    /// 注册新账号；邮箱已存在时返回 Validation 错误
    pub async fn register(&self, email: &str, password: &str) -> Result<user::Model> {
        let email = email.trim().to_ascii_lowercase();

        if self.storage.find_user_by_email(&email).await?.is_some() {
            return Err(QuillpostError::validation(format!(
                "email {} is already registered",
                email
            )));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .storage
            .insert_user(&email, &password_hash, Utc::now())
            .await?;
        info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// 校验邮箱与密码；失败统一返回 AuthRequired，不区分原因
    pub async fn login(&self, email: &str, password: &str) -> Result<user::Model> {
        let email = email.trim().to_ascii_lowercase();

        let Some(user) = self.storage.find_user_by_email(&email).await? else {
            warn!("Login failed for unknown email");
            return Err(QuillpostError::auth_required("invalid credentials"));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Login failed for {}: wrong password", user.email);
            return Err(QuillpostError::auth_required("invalid credentials"));
        }

        info!("User {} signed in", user.email);
        Ok(user)
    }
}
