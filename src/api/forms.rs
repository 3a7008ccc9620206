//! Form payloads and validation
//!
//! Fields default to empty strings so a missing field becomes a validation
//! error instead of a deserialization failure. Validators return fully
//! localized, field-labelled messages ready for the error banner.

use serde::Deserialize;

use crate::i18n::Localizer;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn field_error(loc: &Localizer<'_>, label_key: &str, message: String) -> String {
    format!("{}: {}", loc.text(label_key), message)
}

fn required(loc: &Localizer<'_>, label_key: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(field_error(loc, label_key, loc.text("error_field_required")));
    }
}

pub fn validate_entry(form: &EntryForm, loc: &Localizer<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    required(loc, "label_title", &form.title, &mut errors);
    required(loc, "label_body", &form.body, &mut errors);
    if form.title.trim().chars().count() > MAX_TITLE_CHARS {
        let max = MAX_TITLE_CHARS as i64;
        errors.push(field_error(
            loc,
            "label_title",
            loc.format("error_title_too_long", &[&max]),
        ));
    }
    errors
}

pub fn validate_comment(form: &CommentForm, loc: &Localizer<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    required(loc, "label_comment", &form.body, &mut errors);
    errors
}

pub fn validate_login(form: &LoginForm, loc: &Localizer<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    required(loc, "label_email", &form.email, &mut errors);
    required(loc, "label_password", &form.password, &mut errors);
    errors
}

pub fn validate_register(form: &RegisterForm, loc: &Localizer<'_>) -> Vec<String> {
    let mut errors = Vec::new();
    required(loc, "label_email", &form.email, &mut errors);
    if !form.email.trim().is_empty() && !is_plausible_email(form.email.trim()) {
        errors.push(field_error(
            loc,
            "label_email",
            loc.text("error_invalid_email"),
        ));
    }
    if form.password.chars().count() < MIN_PASSWORD_CHARS {
        let min = MIN_PASSWORD_CHARS as i64;
        errors.push(field_error(
            loc,
            "label_password",
            loc.format("error_password_too_short", &[&min]),
        ));
    }
    errors
}

/// 宽松的邮箱格式检查：local@domain，domain 至少带一个点
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
