//! Blog flow integration tests
//!
//! Covers the entry publishing gate, comment posting and the not-found path
//! against a real sqlite-backed app.

use std::sync::{Arc, Once};

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use migration::entities::user;
use quillpost::api::constants::SESSION_COOKIE_NAME;
use quillpost::api::jwt::get_jwt_service;
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
            let db_path = temp_dir.path().join("blog_flow_test.db");
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

async fn ensure_user(storage: &Arc<BlogStorage>, email: &str, password: &str) -> user::Model {
    let accounts = AccountService::new(storage.clone());
    match accounts.register(email, password).await {
        Ok(user) => user,
        Err(_) => storage
            .find_user_by_email(email)
            .await
            .expect("user lookup should succeed")
            .expect("user should exist"),
    }
}

fn session_cookie_for(user: &user::Model) -> Cookie<'static> {
    let token = get_jwt_service()
        .generate_session_token(user.id, &user.email)
        .expect("token generation should succeed");
    Cookie::new(SESSION_COOKIE_NAME, token)
}

fn location_of(res: &actix_web::dev::ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect should carry a Location header")
        .to_string()
}

// =============================================================================
// Entry publishing
// =============================================================================

#[actix_rt::test]
async fn test_unauthenticated_entry_post_redirects_to_login() {
    let app = test_app!(storage().await);

    let req = TestRequest::post()
        .uri("/blog")
        .set_form([("title", "Draft"), ("body", "text")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&res), "/auth/login");
}

#[actix_rt::test]
async fn test_non_admin_entry_post_is_forbidden_with_localized_message() {
    let storage = storage().await;
    let reader = ensure_user(&storage, "reader@example.com", "password123").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/blog")
        .cookie(session_cookie_for(&reader))
        .set_form([("title", "Draft"), ("body", "text")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("You are not an admin."));
}

#[actix_rt::test]
async fn test_admin_can_publish_entry_and_sees_confirmation() {
    let storage = storage().await;
    let admin = ensure_user(&storage, "admin@example.com", "password123").await;
    let app = test_app!(storage);
    let session = session_cookie_for(&admin);

    let req = TestRequest::post()
        .uri("/blog")
        .cookie(session.clone())
        .set_form([("title", "My first post"), ("body", "Some *notes* here.")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = location_of(&res);
    assert!(location.starts_with("/blog/"));

    let flash = res
        .response()
        .cookies()
        .find(|c| c.name() == "qp_flash")
        .expect("redirect should set a flash cookie")
        .into_owned();

    // Follow the redirect with the flash cookie: the detail page shows the
    // rendered entry plus the localized confirmation containing the title.
    let req = TestRequest::get()
        .uri(&location)
        .cookie(session)
        .cookie(flash)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("My first post"));
    assert!(text.contains("<em>notes</em>"));
    assert!(text.contains("has been published."));
}

#[actix_rt::test]
async fn test_entry_validation_failure_rerenders_with_errors() {
    let storage = storage().await;
    let admin = ensure_user(&storage, "admin@example.com", "password123").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/blog")
        .cookie(session_cookie_for(&admin))
        .set_form([("title", ""), ("body", "kept content")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("This field is required."));
    // submitted values survive the re-render
    assert!(text.contains("kept content"));
}

// =============================================================================
// Comments
// =============================================================================

#[actix_rt::test]
async fn test_authenticated_user_can_comment() {
    let storage = storage().await;
    let reader = ensure_user(&storage, "commenter@example.com", "password123").await;
    let entries = EntryService::new(storage.clone());
    let entry = entries
        .publish("Entry with comments", "body")
        .await
        .expect("publish should succeed");
    let app = test_app!(storage);
    let session = session_cookie_for(&reader);

    let req = TestRequest::post()
        .uri(&format!("/blog/{}", entry.id))
        .cookie(session.clone())
        .set_form([("body", "Nice write-up, thanks!")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&res), format!("/blog/{}", entry.id));

    let req = TestRequest::get()
        .uri(&format!("/blog/{}", entry.id))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Nice write-up, thanks!"));
    assert!(text.contains("commenter@example.com"));
}

#[actix_rt::test]
async fn test_anonymous_comment_redirects_to_login() {
    let storage = storage().await;
    let entries = EntryService::new(storage.clone());
    let entry = entries
        .publish("Read-only entry", "body")
        .await
        .expect("publish should succeed");
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri(&format!("/blog/{}", entry.id))
        .set_form([("body", "drive-by comment")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&res), "/auth/login");
}

#[actix_rt::test]
async fn test_empty_comment_rerenders_detail_with_error() {
    let storage = storage().await;
    let reader = ensure_user(&storage, "empty-commenter@example.com", "password123").await;
    let entries = EntryService::new(storage.clone());
    let entry = entries
        .publish("Entry for empty comment", "body")
        .await
        .expect("publish should succeed");
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri(&format!("/blog/{}", entry.id))
        .cookie(session_cookie_for(&reader))
        .set_form([("body", "   ")])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("This field is required."));
    assert!(text.contains("Entry for empty comment"));
}

// =============================================================================
// Reads and not-found
// =============================================================================

#[actix_rt::test]
async fn test_unknown_entry_detail_is_not_found() {
    let app = test_app!(storage().await);

    let req = TestRequest::get().uri("/blog/999999").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/blog/not-a-number").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_homepage_renders_recent_entries() {
    let storage = storage().await;
    let entries = EntryService::new(storage.clone());
    entries
        .publish("Homepage entry", "body")
        .await
        .expect("publish should succeed");
    let app = test_app!(storage);

    let req = TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = test::read_body(res).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert!(text.contains("Quillpost"));
    assert!(text.contains("Homepage entry"));
}

#[actix_rt::test]
async fn test_blog_list_orders_newest_first() {
    let storage = storage().await;
    let entries = EntryService::new(storage.clone());
    entries
        .publish("Older entry for ordering", "body")
        .await
        .expect("publish should succeed");
    // 保证两条的时间戳可区分
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    entries
        .publish("Newer entry for ordering", "body")
        .await
        .expect("publish should succeed");
    let app = test_app!(storage);

    let req = TestRequest::get().uri("/blog").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).unwrap();

    let newer = text.find("Newer entry for ordering").expect("newer listed");
    let older = text.find("Older entry for ordering").expect("older listed");
    assert!(newer < older);
}
