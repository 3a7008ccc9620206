//! Session and flash cookie builders

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};

use crate::api::constants;
use crate::config::SameSitePolicy;

/// Cookie 构建器，消除重复的 cookie 创建代码
pub struct CookieBuilder {
    same_site: SameSite,
    secure: bool,
    domain: Option<String>,
    session_minutes: u64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let same_site = match config.auth.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            same_site,
            secure: config.auth.cookie_secure,
            domain: config.auth.cookie_domain.clone(),
            session_minutes: config.auth.session_minutes,
        }
    }

    fn build_cookie_base(
        &self,
        name: String,
        value: String,
        max_age: actix_web::cookie::time::Duration,
    ) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/".to_string());
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        if let Some(ref domain) = self.domain {
            cookie.set_domain(domain.clone());
        }
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(
            constants::SESSION_COOKIE_NAME.to_string(),
            token,
            actix_web::cookie::time::Duration::minutes(self.session_minutes as i64),
        )
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::SESSION_COOKIE_NAME.to_string(),
            String::new(),
            actix_web::cookie::time::Duration::ZERO,
        )
    }

    /// Flash cookie：重定向时写入，下一次页面渲染时读取并清除
    pub fn build_flash_cookie(&self, message: &str) -> Cookie<'static> {
        self.build_cookie_base(
            constants::FLASH_COOKIE_NAME.to_string(),
            urlencoding::encode(message).into_owned(),
            actix_web::cookie::time::Duration::minutes(5),
        )
    }

    pub fn build_expired_flash_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(
            constants::FLASH_COOKIE_NAME.to_string(),
            String::new(),
            actix_web::cookie::time::Duration::ZERO,
        )
    }
}

/// 读取请求携带的 flash 消息
pub fn read_flash(req: &HttpRequest) -> Option<String> {
    let cookie = req.cookie(constants::FLASH_COOKIE_NAME)?;
    if cookie.value().is_empty() {
        return None;
    }
    urlencoding::decode(cookie.value())
        .ok()
        .map(|s| s.into_owned())
}
