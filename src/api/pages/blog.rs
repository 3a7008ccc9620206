use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use gtmpl::Value;

use super::{internal_error, respond, see_other, see_other_with_flash, shell};
use crate::api::authz::{Decision, WriteAction, authorize};
use crate::api::forms::{EntryForm, validate_entry};
use crate::api::middleware::current_user;
use crate::config::get_config;
use crate::i18n::{Catalog, Localizer};
use crate::render::{TemplateEngine, entry_summary_value, escape_html};
use crate::services::EntryService;

/// GET /blog - 文章列表；管理员可见发布表单
pub async fn list(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    entries: web::Data<EntryService>,
) -> HttpResponse {
    render_list_page(&req, &engine, &catalog, &entries, Vec::new(), None).await
}

/// POST /blog - 发布新文章（仅管理员）
pub async fn create(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    entries: web::Data<EntryService>,
    form: web::Form<EntryForm>,
) -> HttpResponse {
    let config = get_config();
    let user = current_user(&req);
    let loc = Localizer::new(&catalog, super::request_language(&req, &catalog));

    match authorize(
        WriteAction::PublishEntry,
        user.as_ref(),
        &config.site.admin_email,
    ) {
        Decision::RequireLogin => see_other("/auth/login"),
        Decision::Forbidden { message_key } => {
            forbidden_page(&req, &engine, &catalog, &loc, message_key)
        }
        Decision::Allow => {
            let errors = validate_entry(&form, &loc);
            if !errors.is_empty() {
                return render_list_page(&req, &engine, &catalog, &entries, errors, Some(&*form))
                    .await;
            }

            match entries.publish(&form.title, &form.body).await {
                Ok(entry) => see_other_with_flash(
                    &format!("/blog/{}", entry.id),
                    &loc.format("flash_entry_created", &[&entry.title]),
                ),
                Err(e) => internal_error(&e),
            }
        }
    }
}

async fn render_list_page(
    req: &HttpRequest,
    engine: &TemplateEngine,
    catalog: &Catalog,
    entries: &EntryService,
    errors: Vec<String>,
    submitted: Option<&EntryForm>,
) -> HttpResponse {
    let all = match entries.recent(None).await {
        Ok(all) => all,
        Err(e) => return internal_error(&e),
    };

    let config = get_config();
    let can_publish = current_user(req)
        .map(|u| u.email.eq_ignore_ascii_case(&config.site.admin_email))
        .unwrap_or(false);

    let shell = shell(req, catalog);
    let had_flash = shell.had_flash;
    let ctx = shell
        .ctx
        .errors(errors)
        .set(
            "entries",
            Value::Array(all.iter().map(entry_summary_value).collect()),
        )
        .set("can_publish", Value::from(can_publish))
        .set(
            "form_title",
            Value::from(submitted.map(|f| escape_html(&f.title)).unwrap_or_default()),
        )
        .set(
            "form_body",
            Value::from(submitted.map(|f| escape_html(&f.body)).unwrap_or_default()),
        );

    respond(engine, "blog", had_flash, ctx, StatusCode::OK)
}

fn forbidden_page(
    req: &HttpRequest,
    engine: &TemplateEngine,
    catalog: &Catalog,
    loc: &Localizer<'_>,
    message_key: &str,
) -> HttpResponse {
    let shell = shell(req, catalog);
    let had_flash = shell.had_flash;
    let ctx = shell.ctx.set("message", Value::from(loc.text(message_key)));
    respond(engine, "forbidden", had_flash, ctx, StatusCode::FORBIDDEN)
}
