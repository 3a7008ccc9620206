use pulldown_cmark::{Options, Parser, html};

/// 将文章正文的 Markdown 渲染为 HTML
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

/// HTML 转义用户输入（标题、评论、邮箱等），模板不做自动转义
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // escape_html 只对 String/fmt writer 失败，这里写入 String 不会出错
    let _ = pulldown_cmark::escape::escape_html(&mut out, text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_basics() {
        let html = markdown_to_html("# Heading\n\nSome *emphasis* and a [link](https://example.org).");
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(html.contains(r#"<a href="https://example.org">link</a>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }
}
