//! Server mode
//!
//! Configures and starts the HTTP server with all routes, then waits for a
//! shutdown signal.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::middleware::SessionAuth;
use crate::api::pages;
use crate::api::routes::{auth_routes, blog_routes, home_route};
use crate::render::TemplateEngine;
use crate::runtime::{shutdown, startup};

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = startup::prepare_server_startup().await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let storage = startup.storage.clone();
    let catalog = startup.catalog.clone();
    let entry_service = startup.entry_service.clone();
    let comment_service = startup.comment_service.clone();
    let account_service = startup.account_service.clone();

    let config = crate::config::get_config();
    let cpu_count = config.server.cpu_count.min(32);
    let max_body_bytes = config.limits.max_body_bytes;
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    // Clone db reference before storage moves into the HttpServer closure
    let db_for_shutdown = storage.get_db().clone();

    warn!("Starting server at http://{}", bind_address);

    let server = HttpServer::new(move || {
        // 模板已在 prepare_server_startup 中校验过，这里按 worker 重新解析
        let templates =
            TemplateEngine::load().expect("templates were validated during startup");

        App::new()
            .wrap(Compress::default())
            .wrap(SessionAuth)
            .app_data(web::Data::new(templates))
            .app_data(web::Data::from(catalog.clone()))
            .app_data(web::Data::from(entry_service.clone()))
            .app_data(web::Data::from(comment_service.clone()))
            .app_data(web::Data::from(account_service.clone()))
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .app_data(web::FormConfig::default().limit(max_body_bytes))
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000")),
            )
            .service(home_route())
            .service(auth_routes())
            .service(blog_routes())
            .default_service(web::route().to(pages::not_found))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .bind(bind_address)?
    .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
