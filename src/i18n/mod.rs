//! Localized message tables
//!
//! One TOML file per language tag (`en.toml`, `de.toml`, ...) mapping message
//! keys to template strings with positional `{0}` placeholders. Tables are
//! loaded from the configured locales directory, falling back to copies
//! embedded at compile time when the directory is absent. Lookup falls back
//! to the default language when a language or key is missing.

use std::collections::HashMap;
use std::fmt;

use rust_embed::Embed;
use tracing::{debug, warn};

use crate::errors::{QuillpostError, Result};

#[derive(Embed)]
#[folder = "locales/"]
struct LocaleAssets;

/// 所有已加载语言的消息表
pub struct Catalog {
    tables: HashMap<String, HashMap<String, String>>,
    default_language: String,
}

impl Catalog {
    /// 从 `locales_dir` 加载全部 `*.toml` 消息表；目录不存在时使用内嵌副本
    pub fn load(locales_dir: &str, default_language: &str) -> Result<Self> {
        let mut tables = HashMap::new();

        let dir = std::path::Path::new(locales_dir);
        if dir.is_dir() {
            for dir_entry in std::fs::read_dir(dir)? {
                let path = dir_entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    continue;
                }
                let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let content = std::fs::read_to_string(&path)?;
                tables.insert(lang.to_string(), parse_table(lang, &content)?);
            }
            debug!("Loaded {} locale(s) from {}", tables.len(), locales_dir);
        } else {
            warn!(
                "Locales directory {} not found, using embedded message tables",
                locales_dir
            );
            for file in LocaleAssets::iter() {
                let Some(lang) = file.strip_suffix(".toml") else {
                    continue;
                };
                let asset = LocaleAssets::get(&file)
                    .ok_or_else(|| QuillpostError::locale(format!("missing asset {}", file)))?;
                let content = String::from_utf8_lossy(&asset.data).into_owned();
                tables.insert(lang.to_string(), parse_table(lang, &content)?);
            }
        }

        if !tables.contains_key(default_language) {
            return Err(QuillpostError::locale(format!(
                "no message table for default language '{}'",
                default_language
            )));
        }

        Ok(Catalog {
            tables,
            default_language: default_language.to_string(),
        })
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn supports(&self, lang: &str) -> bool {
        self.tables.contains_key(lang)
    }

    /// 查找消息模板：请求语言 → 默认语言 → key 本身
    pub fn template(&self, lang: &str, key: &str) -> String {
        if let Some(msg) = self.tables.get(lang).and_then(|t| t.get(key)) {
            return msg.clone();
        }
        if let Some(msg) = self
            .tables
            .get(&self.default_language)
            .and_then(|t| t.get(key))
        {
            return msg.clone();
        }
        warn!("Missing message key '{}' for language '{}'", key, lang);
        key.to_string()
    }

    /// 查找并做位置参数插值
    pub fn format(&self, lang: &str, key: &str, args: &[&dyn fmt::Display]) -> String {
        interpolate(&self.template(lang, key), args)
    }

    /// 某语言的完整消息表（含默认语言兜底），供模板上下文使用
    pub fn table_for(&self, lang: &str) -> HashMap<String, String> {
        let mut merged = self
            .tables
            .get(&self.default_language)
            .cloned()
            .unwrap_or_default();
        if lang != self.default_language
            && let Some(table) = self.tables.get(lang)
        {
            for (k, v) in table {
                merged.insert(k.clone(), v.clone());
            }
        }
        merged
    }
}

fn parse_table(lang: &str, content: &str) -> Result<HashMap<String, String>> {
    toml::from_str::<HashMap<String, String>>(content)
        .map_err(|e| QuillpostError::locale(format!("locale '{}' is not a flat table: {}", lang, e)))
}

/// 将 `{0}`、`{1}` 占位符替换为对应参数
fn interpolate(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{}}}", i), &arg.to_string());
    }
    out
}

/// 绑定了请求语言的消息查找器
pub struct Localizer<'a> {
    catalog: &'a Catalog,
    lang: String,
}

impl<'a> Localizer<'a> {
    pub fn new(catalog: &'a Catalog, lang: impl Into<String>) -> Self {
        Self {
            catalog,
            lang: lang.into(),
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn text(&self, key: &str) -> String {
        self.catalog.template(&self.lang, key)
    }

    pub fn format(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        self.catalog.format(&self.lang, key, args)
    }
}

/// 从 Accept-Language 头协商请求语言
///
/// 逐个尝试请求的语言标签（忽略 q 值权重，按出现顺序），先精确匹配，
/// 再按主子标签匹配；都不支持时返回默认语言。
pub fn negotiate_language(header: Option<&str>, catalog: &Catalog) -> String {
    if let Some(header) = header {
        for part in header.split(',') {
            let tag = part.split(';').next().unwrap_or("").trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }
            let tag = tag.to_ascii_lowercase();
            if catalog.supports(&tag) {
                return tag;
            }
            if let Some(primary) = tag.split('-').next()
                && catalog.supports(primary)
            {
                return primary.to_string();
            }
        }
    }
    catalog.default_language().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> Catalog {
        let mut en = HashMap::new();
        en.insert("greeting".to_string(), "Hello {0}".to_string());
        en.insert("only_en".to_string(), "English only".to_string());
        let mut de = HashMap::new();
        de.insert("greeting".to_string(), "Hallo {0}".to_string());

        let mut tables = HashMap::new();
        tables.insert("en".to_string(), en);
        tables.insert("de".to_string(), de);
        Catalog {
            tables,
            default_language: "en".to_string(),
        }
    }

    #[test]
    fn test_lookup_in_requested_language() {
        let catalog = test_catalog();
        assert_eq!(catalog.format("de", "greeting", &[&"Welt"]), "Hallo Welt");
    }

    #[test]
    fn test_unsupported_language_falls_back_to_default() {
        let catalog = test_catalog();
        assert_eq!(catalog.format("fr", "greeting", &[&"monde"]), "Hello monde");
    }

    #[test]
    fn test_missing_key_falls_back_to_default_language() {
        let catalog = test_catalog();
        assert_eq!(catalog.template("de", "only_en"), "English only");
    }

    #[test]
    fn test_missing_key_everywhere_returns_key() {
        let catalog = test_catalog();
        assert_eq!(catalog.template("en", "nope"), "nope");
    }

    #[test]
    fn test_interpolation_is_positional_and_typed() {
        let n: i64 = 3;
        assert_eq!(
            interpolate("{1} of {0}", &[&"many", &n]),
            "3 of many"
        );
    }

    #[test]
    fn test_table_for_merges_default() {
        let catalog = test_catalog();
        let table = catalog.table_for("de");
        assert_eq!(table.get("greeting").unwrap(), "Hallo {0}");
        assert_eq!(table.get("only_en").unwrap(), "English only");
    }

    #[test]
    fn test_negotiate_language() {
        let catalog = test_catalog();
        assert_eq!(
            negotiate_language(Some("de-DE,de;q=0.9,en;q=0.8"), &catalog),
            "de"
        );
        assert_eq!(negotiate_language(Some("fr-FR, fr"), &catalog), "en");
        assert_eq!(negotiate_language(Some("*"), &catalog), "en");
        assert_eq!(negotiate_language(None, &catalog), "en");
    }

    #[test]
    fn test_parse_table_rejects_nested() {
        assert!(parse_table("en", "[section]\nkey = \"v\"").is_err());
        assert!(parse_table("en", "key = \"v\"").is_ok());
    }
}
