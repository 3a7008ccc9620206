//! 认证子站：注册、登录、登出

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use gtmpl::Value;
use migration::entities::user;
use tracing::error;

use super::{internal_error, respond, see_other_with_flash, shell};
use crate::api::cookies::CookieBuilder;
use crate::api::forms::{LoginForm, RegisterForm, validate_login, validate_register};
use crate::api::jwt::get_jwt_service;
use crate::errors::QuillpostError;
use crate::i18n::{Catalog, Localizer};
use crate::render::{TemplateEngine, escape_html};
use crate::services::AccountService;

/// GET /auth/login
pub async fn login_form(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    render_auth_page(&req, &engine, &catalog, "login", Vec::new(), "", StatusCode::OK)
}

/// POST /auth/login
pub async fn login(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    accounts: web::Data<AccountService>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let loc = Localizer::new(&catalog, super::request_language(&req, &catalog));

    let errors = validate_login(&form, &loc);
    if !errors.is_empty() {
        return render_auth_page(
            &req,
            &engine,
            &catalog,
            "login",
            errors,
            &form.email,
            StatusCode::OK,
        );
    }

    match accounts.login(&form.email, &form.password).await {
        Ok(user) => sign_in_response(&user, &loc.format("flash_logged_in", &[&user.email])),
        Err(QuillpostError::AuthRequired(_)) => render_auth_page(
            &req,
            &engine,
            &catalog,
            "login",
            vec![loc.text("error_invalid_credentials")],
            &form.email,
            StatusCode::UNAUTHORIZED,
        ),
        Err(e) => internal_error(&e),
    }
}

/// GET /auth/register
pub async fn register_form(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
) -> HttpResponse {
    render_auth_page(
        &req,
        &engine,
        &catalog,
        "register",
        Vec::new(),
        "",
        StatusCode::OK,
    )
}

/// POST /auth/register - 建号后直接登录
pub async fn register(
    req: HttpRequest,
    engine: web::Data<TemplateEngine>,
    catalog: web::Data<Catalog>,
    accounts: web::Data<AccountService>,
    form: web::Form<RegisterForm>,
) -> HttpResponse {
    let loc = Localizer::new(&catalog, super::request_language(&req, &catalog));

    let errors = validate_register(&form, &loc);
    if !errors.is_empty() {
        return render_auth_page(
            &req,
            &engine,
            &catalog,
            "register",
            errors,
            &form.email,
            StatusCode::OK,
        );
    }

    match accounts.register(&form.email, &form.password).await {
        Ok(user) => sign_in_response(&user, &loc.format("flash_registered", &[&user.email])),
        Err(QuillpostError::Validation(_)) => {
            let email = form.email.trim().to_ascii_lowercase();
            render_auth_page(
                &req,
                &engine,
                &catalog,
                "register",
                vec![loc.format("error_email_taken", &[&email])],
                &form.email,
                StatusCode::OK,
            )
        }
        Err(e) => internal_error(&e),
    }
}

/// POST /auth/logout
pub async fn logout(req: HttpRequest, catalog: web::Data<Catalog>) -> HttpResponse {
    let loc = Localizer::new(&catalog, super::request_language(&req, &catalog));
    let builder = CookieBuilder::from_config();

    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(builder.build_expired_session_cookie())
        .cookie(builder.build_flash_cookie(&loc.text("flash_logged_out")))
        .finish()
}

fn sign_in_response(user: &user::Model, flash: &str) -> HttpResponse {
    let token = match get_jwt_service().generate_session_token(user.id, &user.email) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate session token: {}", e);
            return HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error");
        }
    };

    let builder = CookieBuilder::from_config();
    let mut response = see_other_with_flash("/", flash);
    if let Err(e) = response.add_cookie(&builder.build_session_cookie(token)) {
        error!("Failed to attach session cookie: {}", e);
    }
    response
}

#[allow(clippy::too_many_arguments)]
fn render_auth_page(
    req: &HttpRequest,
    engine: &TemplateEngine,
    catalog: &Catalog,
    template: &str,
    errors: Vec<String>,
    email_prefill: &str,
    status: StatusCode,
) -> HttpResponse {
    let shell = shell(req, catalog);
    let had_flash = shell.had_flash;
    let ctx = shell
        .ctx
        .errors(errors)
        .set("form_email", Value::from(escape_html(email_prefill.trim())));
    respond(engine, template, had_flash, ctx, status)
}
