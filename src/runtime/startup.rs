use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{StaticConfig, get_config};
use crate::i18n::Catalog;
use crate::render::TemplateEngine;
use crate::services::{AccountService, CommentService, EntryService};
use crate::storage::BlogStorage;

pub struct StartupContext {
    pub storage: Arc<BlogStorage>,
    pub catalog: Arc<Catalog>,
    pub entry_service: Arc<EntryService>,
    pub comment_service: Arc<CommentService>,
    pub account_service: Arc<AccountService>,
}

/// 准备服务器启动的上下文
///
/// 连接池与迁移、消息表、模板、服务，按固定顺序一次完成。
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = Arc::new(
        BlogStorage::new(&config.database.database_url)
            .await
            .context("Failed to initialize storage backend")?,
    );
    info!("Using storage backend: {}", storage.backend_name());

    let catalog = Arc::new(
        Catalog::load(&config.site.locales_dir, &config.site.default_language)
            .context("Failed to load message catalogs")?,
    );
    info!(
        "Message catalogs loaded, default language: {}",
        catalog.default_language()
    );

    // 模板在这里整体校验一次；worker 各自再加载属于廉价重复解析
    TemplateEngine::load().context("Failed to compile page templates")?;

    check_startup_config(config);

    let entry_service = Arc::new(EntryService::new(storage.clone()));
    let comment_service = Arc::new(CommentService::new(storage.clone()));
    let account_service = Arc::new(AccountService::new(storage.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        catalog,
        entry_service,
        comment_service,
        account_service,
    })
}

fn check_startup_config(config: &StaticConfig) {
    if config.auth.jwt_secret.is_empty() {
        warn!(
            "WARNING: auth.jwt_secret is not set. A random secret will be \
            generated and all sessions will be invalidated on restart."
        );
    } else if config.auth.jwt_secret.len() < 32 {
        warn!(
            "WARNING: JWT Secret is too short ({} bytes). \
            Recommended minimum is 32 bytes for security.",
            config.auth.jwt_secret.len()
        );
    }

    if !config.auth.cookie_secure {
        warn!(
            "WARNING: Cookie Secure flag is disabled. \
            Cookies will be sent over unencrypted HTTP connections. \
            Enable cookie_secure=true for production environments."
        );
    }

    info!(
        "Entry publishing restricted to {}",
        config.site.admin_email
    );
}
