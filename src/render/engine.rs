use std::collections::HashMap;

use gtmpl::Template;
use rust_embed::Embed;
use tracing::debug;

use crate::errors::{QuillpostError, Result};

// 页面模板在编译期嵌入二进制
#[derive(Embed)]
#[folder = "templates/"]
struct TemplateAssets;

/// 已编译的页面模板集合，按不含扩展名的文件名索引
pub struct TemplateEngine {
    templates: HashMap<String, Template>,
}

impl TemplateEngine {
    /// 解析全部内嵌 `*.tmpl` 模板
    pub fn load() -> Result<Self> {
        let mut templates = HashMap::new();

        for file in TemplateAssets::iter() {
            let Some(name) = file.strip_suffix(".tmpl") else {
                continue;
            };
            let asset = TemplateAssets::get(&file)
                .ok_or_else(|| QuillpostError::template(format!("missing asset {}", file)))?;
            let content = String::from_utf8_lossy(&asset.data).into_owned();

            let mut template = Template::default();
            template
                .parse(&content)
                .map_err(|e| QuillpostError::template(format!("{}: {}", file, e)))?;
            templates.insert(name.to_string(), template);
        }

        if templates.is_empty() {
            return Err(QuillpostError::template("no embedded page templates"));
        }

        debug!("Compiled {} page template(s)", templates.len());
        Ok(TemplateEngine { templates })
    }

    /// 渲染模板为 HTML 字符串
    pub fn render(&self, name: &str, value: gtmpl::Value) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| QuillpostError::template(format!("unknown template '{}'", name)))?;

        let context = gtmpl::Context::from(value).map_err(QuillpostError::template)?;

        let mut out: Vec<u8> = Vec::new();
        template
            .execute(&mut out, &context)
            .map_err(QuillpostError::template)?;

        String::from_utf8(out).map_err(|e| QuillpostError::template(e.to_string()))
    }
}
