//! 路由配置

use actix_web::web;

use super::pages::{auth, blog, entry, home};

/// 博客路由 `/blog`
///
/// - GET  /blog        - 文章列表
/// - POST /blog        - 发布文章（仅管理员）
/// - GET  /blog/{id}   - 文章详情与评论
/// - POST /blog/{id}   - 发表评论（需要登录）
pub fn blog_routes() -> actix_web::Scope {
    web::scope("/blog")
        .route("", web::get().to(blog::list))
        .route("", web::post().to(blog::create))
        .route("/{id}", web::get().to(entry::detail))
        .route("/{id}", web::post().to(entry::comment))
}

/// 认证路由 `/auth`
///
/// - GET  /auth/login     - 登录表单
/// - POST /auth/login     - 登录
/// - GET  /auth/register  - 注册表单
/// - POST /auth/register  - 注册并登录
/// - POST /auth/logout    - 登出
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::get().to(auth::login_form))
        .route("/login", web::post().to(auth::login))
        .route("/register", web::get().to(auth::register_form))
        .route("/register", web::post().to(auth::register))
        .route("/logout", web::post().to(auth::logout))
}

/// 首页路由
pub fn home_route() -> actix_web::Resource {
    web::resource("/").route(web::get().to(home::index))
}
