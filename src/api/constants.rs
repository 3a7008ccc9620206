/// 会话 Cookie 名
pub const SESSION_COOKIE_NAME: &str = "qp_session";

/// 一次性提示消息 Cookie 名
pub const FLASH_COOKIE_NAME: &str = "qp_flash";
