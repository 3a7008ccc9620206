//! Write authorization
//!
//! The service has exactly two protected operations. They are checked against
//! an ordered rule list: the first rule matching the action decides; actions
//! without a rule (all reads) are allowed unconditionally.

use crate::api::middleware::CurrentUser;

/// 需要授权的写操作
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteAction {
    PublishEntry,
    PostComment,
}

/// 授权结果
#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// 匿名访问受保护操作：引导到登录页
    RequireLogin,
    /// 已登录但权限不足：携带本地化消息 key 的拒绝
    Forbidden { message_key: &'static str },
}

struct Rule {
    action: WriteAction,
    requires_admin: bool,
    denial_key: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        action: WriteAction::PublishEntry,
        requires_admin: true,
        denial_key: "error_not_admin",
    },
    Rule {
        action: WriteAction::PostComment,
        requires_admin: false,
        denial_key: "error_login_required",
    },
];

/// 按规则表授权一次写操作
pub fn authorize(
    action: WriteAction,
    user: Option<&CurrentUser>,
    admin_email: &str,
) -> Decision {
    for rule in RULES {
        if rule.action != action {
            continue;
        }
        let Some(user) = user else {
            return Decision::RequireLogin;
        };
        if rule.requires_admin && !user.email.eq_ignore_ascii_case(admin_email) {
            return Decision::Forbidden {
                message_key: rule.denial_key,
            };
        }
        return Decision::Allow;
    }

    Decision::Allow
}
