use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use gtmpl::Value;
use migration::entities::{comment, entry};

use super::{internal_error, not_found_page, respond, see_other, see_other_with_flash, shell};
use crate::api::authz::{Decision, WriteAction, authorize};
use crate::api::forms::{CommentForm, validate_comment};
use crate::api::middleware::current_user;
use crate::config::get_config;
use crate::errors::QuillpostError;
use crate::i18n::{Catalog, Localizer};
use crate::render::{TemplateEngine, comment_value, entry_detail_value, escape_html};
use crate::services::{CommentService, EntryService};

/// GET /blog/{id} - 文章详情与评论
pub async fn detail(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    entries: web::Data<EntryService>,
    path: web::Path<String>,
) -> HttpResponse {
    let Ok(id) = path.parse::<i64>() else {
        return not_found_page(&req, &engine, &catalog);
    };

    match entries.get_with_comments(id).await {
        Ok((entry, comments)) => {
            render_detail_page(&req, &engine, &catalog, &entry, &comments, Vec::new(), None)
        }
        Err(QuillpostError::NotFound(_)) => not_found_page(&req, &engine, &catalog),
        Err(e) => internal_error(&e),
    }
}

/// POST /blog/{id} - 发表评论（需要登录）
pub async fn comment(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    entries: web::Data<EntryService>,
    comments: web::Data<CommentService>,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> HttpResponse {
    let Ok(id) = path.parse::<i64>() else {
        return not_found_page(&req, &engine, &catalog);
    };

    let config = get_config();
    let user = current_user(&req);
    let loc = Localizer::new(&catalog, super::request_language(&req, &catalog));

    match authorize(
        WriteAction::PostComment,
        user.as_ref(),
        &config.site.admin_email,
    ) {
        Decision::RequireLogin => see_other("/auth/login"),
        Decision::Forbidden { .. } => see_other("/auth/login"),
        Decision::Allow => {
            // authorize 只在有会话时返回 Allow
            let Some(user) = user else {
                return see_other("/auth/login");
            };

            let errors = validate_comment(&form, &loc);
            if !errors.is_empty() {
                return match entries.get_with_comments(id).await {
                    Ok((entry, existing)) => render_detail_page(
                        &req,
                        &engine,
                        &catalog,
                        &entry,
                        &existing,
                        errors,
                        Some(&*form),
                    ),
                    Err(QuillpostError::NotFound(_)) => not_found_page(&req, &engine, &catalog),
                    Err(e) => internal_error(&e),
                };
            }

            match comments.post(id, user.id, &user.email, &form.body).await {
                Ok(_) => see_other_with_flash(
                    &format!("/blog/{}", id),
                    &loc.text("flash_comment_created"),
                ),
                Err(QuillpostError::NotFound(_)) => not_found_page(&req, &engine, &catalog),
                Err(e) => internal_error(&e),
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_detail_page(
    req: &HttpRequest,
    engine: &TemplateEngine,
    catalog: &Catalog,
    entry: &entry::Model,
    comments: &[comment::Model],
    errors: Vec<String>,
    submitted: Option<&CommentForm>,
) -> HttpResponse {
    let shell = shell(req, catalog);
    let had_flash = shell.had_flash;
    let can_comment = current_user(req).is_some();

    let ctx = shell
        .ctx
        .errors(errors)
        .set("entry", entry_detail_value(entry))
        .set(
            "comments",
            Value::Array(comments.iter().map(comment_value).collect()),
        )
        .set("can_comment", Value::from(can_comment))
        .set(
            "form_body",
            Value::from(submitted.map(|f| escape_html(&f.body)).unwrap_or_default()),
        );

    respond(engine, "entry", had_flash, ctx, StatusCode::OK)
}
