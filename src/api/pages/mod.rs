//! HTML page handlers
//!
//! Every handler renders through the shared [`PageShell`]: negotiated request
//! language, merged message table, current user and pending flash message.

pub mod auth;
pub mod blog;
pub mod entry;
pub mod home;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

use crate::api::cookies::{CookieBuilder, read_flash};
use crate::api::middleware::current_user;
use crate::config::get_config;
use crate::errors::QuillpostError;
use crate::i18n::{Catalog, negotiate_language};
use crate::render::{PageContext, TemplateEngine};

/// 页面渲染的公共骨架
pub(crate) struct PageShell {
    pub ctx: PageContext,
    had_flash: bool,
}

/// 协商请求语言
pub(crate) fn request_language(req: &HttpRequest, catalog: &Catalog) -> String {
    let header = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    negotiate_language(header, catalog)
}

pub(crate) fn shell(req: &HttpRequest, catalog: &Catalog) -> PageShell {
    let config = get_config();
    let lang = request_language(req, catalog);
    let flash = read_flash(req);
    let had_flash = flash.is_some();
    let user = current_user(req);

    let ctx = PageContext::new(
        &config.site.title,
        &config.site.base_url,
        &lang,
        catalog.table_for(&lang),
    )
    .user(user.as_ref().map(|u| u.email.as_str()))
    .flash(flash);

    PageShell { ctx, had_flash }
}

/// 渲染页面；消费过 flash 时在响应里清除对应 cookie
pub(crate) fn respond(
    engine: &TemplateEngine,
    template: &str,
    shell_had_flash: bool,
    ctx: PageContext,
    status: StatusCode,
) -> HttpResponse {
    match engine.render(template, ctx.into_value()) {
        Ok(html) => {
            let mut builder = HttpResponse::build(status);
            builder.content_type("text/html; charset=utf-8");
            if shell_had_flash {
                builder.cookie(CookieBuilder::from_config().build_expired_flash_cookie());
            }
            builder.body(html)
        }
        Err(e) => {
            error!("Template rendering failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error")
        }
    }
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub(crate) fn see_other_with_flash(location: &str, message: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(CookieBuilder::from_config().build_flash_cookie(message))
        .finish()
}

pub(crate) fn internal_error(err: &QuillpostError) -> HttpResponse {
    error!("Request failed: {}", err);
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Internal Server Error")
}

/// 404 页面；也是未匹配路由的默认处理器
pub async fn not_found(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    not_found_page(&req, &engine, &catalog)
}

pub(crate) fn not_found_page(
    req: &HttpRequest,
    engine: &TemplateEngine,
    catalog: &Catalog,
) -> HttpResponse {
    let shell = shell(req, catalog);
    let had_flash = shell.had_flash;
    respond(
        engine,
        "not_found",
        had_flash,
        shell.ctx,
        StatusCode::NOT_FOUND,
    )
}
