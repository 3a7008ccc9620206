use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use gtmpl::Value;

use super::{internal_error, respond, shell};
use crate::i18n::Catalog;
use crate::render::{TemplateEngine, entry_summary_value};
use crate::services::EntryService;

const TEASER_COUNT: u64 = 5;

/// GET / - 首页，站点介绍加最新文章
pub async fn index(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    entries: web::Data<EntryService>,
) -> HttpResponse {
    let recent = match entries.recent(Some(TEASER_COUNT)).await {
        Ok(recent) => recent,
        Err(e) => return internal_error(&e),
    };

    let shell = shell(&req, &catalog);
    let had_flash = shell.had_flash;
    let ctx = shell.ctx.set(
        "entries",
        Value::Array(recent.iter().map(entry_summary_value).collect()),
    );

    respond(&engine, "home", had_flash, ctx, StatusCode::OK)
}
