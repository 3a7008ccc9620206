//! Auth subsite integration tests
//!
//! Register, login and logout flows over a real sqlite-backed app.

use std::sync::{Arc, Once};

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use quillpost::api::constants::SESSION_COOKIE_NAME;
use quillpost::api::middleware::SessionAuth;
use quillpost::api::pages;
use quillpost::api::routes::{auth_routes, blog_routes, home_route};
use quillpost::config::init_config;
use quillpost::i18n::Catalog;
use quillpost::render::TemplateEngine;
use quillpost::services::{AccountService, CommentService, EntryService};
use quillpost::storage::BlogStorage;

// =============================================================================
// Test Setup
// =============================================================================

static INIT: Once = Once::new();
static TEST_DIR: std::sync::OnceLock<TempDir> = std::sync::OnceLock::new();
static STORAGE: tokio::sync::OnceCell<Arc<BlogStorage>> = tokio::sync::OnceCell::const_new();

async fn storage() -> Arc<BlogStorage> {
    INIT.call_once(|| {
        init_config();
    });

    STORAGE
        .get_or_init(|| async {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let db_path = temp_dir.path().join("auth_api_test.db");
            let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

            let storage = Arc::new(
                BlogStorage::new(&db_url)
                    .await
                    .expect("Failed to create storage"),
            );
            let _ = TEST_DIR.set(temp_dir);
            storage
        })
        .await
        .clone()
}

macro_rules! test_app {
    ($storage:expr) => {{
        let storage: Arc<BlogStorage> = $storage;
        let catalog = Arc::new(Catalog::load("./locales", "en").expect("locales should load"));
        let entry_service = Arc::new(EntryService::new(storage.clone()));
        let comment_service = Arc::new(CommentService::new(storage.clone()));
        let account_service = Arc::new(AccountService::new(storage.clone()));

        test::init_service(
            App::new()
                .wrap(SessionAuth)
                .app_data(web::Data::new(
                    TemplateEngine::load().expect("templates should compile"),
                ))
                .app_data(web::Data::from(catalog))
                .app_data(web::Data::from(entry_service))
                .app_data(web::Data::from(comment_service))
                .app_data(web::Data::from(account_service))
                .service(home_route())
                .service(auth_routes())
                .service(blog_routes())
                .default_service(web::route().to(pages::not_found)),
        )
        .await
    }};
}

fn session_cookie_value(res: &actix_web::dev::ServiceResponse) -> Option<String> {
    res.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

// =============================================================================
// Register
// =============================================================================

#[actix_rt::test]
async fn test_register_signs_in_and_redirects_home() {
    let app = test_app!(storage().await);

    let req = TestRequest::post()
        .uri("/auth/register")
        .set_form([
            ("email", "newcomer@example.com"),
            ("password", "password123"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let token = session_cookie_value(&res).expect("register should set a session cookie");
    assert!(!token.is_empty());
}

#[actix_rt::test]
async fn test_register_duplicate_email_rerenders_with_error() {
    let storage = storage().await;
    let accounts = AccountService::new(storage.clone());
    let _ = accounts.register("taken@example.com", "password123").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/auth/register")
        .set_form([("email", "taken@example.com"), ("password", "password456")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("An account for taken@example.com already exists."));
}

#[actix_rt::test]
async fn test_register_validation_errors() {
    let app = test_app!(storage().await);

    let req = TestRequest::post()
        .uri("/auth/register")
        .set_form([("email", "not-an-email"), ("password", "short")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Please enter a valid email address."));
    assert!(text.contains("The password must be at least 8 characters."));
    // submitted email survives the re-render
    assert!(text.contains("not-an-email"));
}

// =============================================================================
// Login / logout
// =============================================================================

#[actix_rt::test]
async fn test_login_with_correct_password() {
    let storage = storage().await;
    let accounts = AccountService::new(storage.clone());
    let _ = accounts.register("login-ok@example.com", "password123").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/auth/login")
        .set_form([
            ("email", "login-ok@example.com"),
            ("password", "password123"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(session_cookie_value(&res).is_some());
}

#[actix_rt::test]
async fn test_login_with_wrong_password_is_rejected() {
    let storage = storage().await;
    let accounts = AccountService::new(storage.clone());
    let _ = accounts
        .register("login-wrong@example.com", "password123")
        .await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/auth/login")
        .set_form([
            ("email", "login-wrong@example.com"),
            ("password", "hunter2hunter2"),
        ])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie_value(&res).is_none());
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Wrong email or password."));
}

#[actix_rt::test]
async fn test_login_unknown_email_is_rejected() {
    let app = test_app!(storage().await);

    let req = TestRequest::post()
        .uri("/auth/login")
        .set_form([("email", "ghost@example.com"), ("password", "password123")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login_missing_fields_rerender() {
    let app = test_app!(storage().await);

    let req = TestRequest::post()
        .uri("/auth/login")
        .set_form([("email", ""), ("password", "")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("This field is required."));
}

#[actix_rt::test]
async fn test_logout_clears_session_cookie() {
    let app = test_app!(storage().await);

    let req = TestRequest::post().uri("/auth/logout").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let cleared = res
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .expect("logout should clear the session cookie");
    assert!(cleared.value().is_empty());
}

#[actix_rt::test]
async fn test_login_form_renders() {
    let app = test_app!(storage().await);

    let req = TestRequest::get().uri("/auth/login").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains(r#"form method="post" action="/auth/login""#));
}
