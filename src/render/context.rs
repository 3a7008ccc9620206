use std::collections::HashMap;

use gtmpl_value::Value;
use migration::entities::{comment, entry};

use super::markdown::{escape_html, markdown_to_html};

/// 页面模板的上下文构建器
///
/// 所有页面共享的字段（站点信息、语言、消息表、当前用户、flash）在
/// `new` 中就位，页面自己的数据通过 `set` 追加。用户提供的字符串在
/// 进入上下文前完成 HTML 转义。
pub struct PageContext {
    fields: HashMap<String, Value>,
}

impl PageContext {
    pub fn new(
        site_title: &str,
        base_url: &str,
        lang: &str,
        messages: HashMap<String, String>,
    ) -> Self {
        let mut fields = HashMap::new();
        fields.insert("site_title".to_string(), Value::from(site_title));
        fields.insert("base_url".to_string(), Value::from(base_url));
        fields.insert("lang".to_string(), Value::from(lang));
        fields.insert(
            "t".to_string(),
            Value::Object(
                messages
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
        );
        fields.insert("user".to_string(), Value::Nil);
        fields.insert("flash".to_string(), Value::Nil);
        fields.insert("errors".to_string(), Value::Array(Vec::new()));
        PageContext { fields }
    }

    /// 当前登录用户的邮箱；None 表示匿名访问
    pub fn user(mut self, email: Option<&str>) -> Self {
        if let Some(email) = email {
            self.fields
                .insert("user".to_string(), Value::from(escape_html(email)));
        }
        self
    }

    /// 一次性提示消息（已本地化）
    pub fn flash(mut self, message: Option<String>) -> Self {
        if let Some(message) = message {
            self.fields
                .insert("flash".to_string(), Value::from(escape_html(&message)));
        }
        self
    }

    /// 表单校验错误（已本地化）
    pub fn errors(mut self, errors: Vec<String>) -> Self {
        self.fields.insert(
            "errors".to_string(),
            Value::Array(
                errors
                    .iter()
                    .map(|e| Value::from(escape_html(e)))
                    .collect(),
            ),
        );
        self
    }

    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// 文章摘要（列表页、首页）
pub fn entry_summary_value(model: &entry::Model) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("id".to_string(), Value::from(model.id));
    m.insert("title".to_string(), Value::from(escape_html(&model.title)));
    m.insert(
        "posted_at".to_string(),
        Value::from(format_timestamp(&model.posted_at)),
    );
    m.insert("url".to_string(), Value::from(format!("/blog/{}", model.id)));
    Value::Object(m)
}

/// 文章详情：正文 Markdown 渲染为 HTML
pub fn entry_detail_value(model: &entry::Model) -> Value {
    let mut value = entry_summary_value(model);
    if let Value::Object(m) = &mut value {
        m.insert(
            "body_html".to_string(),
            Value::from(markdown_to_html(&model.body)),
        );
    }
    value
}

/// 评论与作者署名
pub fn comment_value(model: &comment::Model) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("name".to_string(), Value::from(escape_html(&model.name)));
    m.insert("body".to_string(), Value::from(escape_html(&model.body)));
    m.insert(
        "posted_at".to_string(),
        Value::from(format_timestamp(&model.posted_at)),
    );
    Value::Object(m)
}

fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}
