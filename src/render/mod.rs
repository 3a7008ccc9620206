//! HTML page rendering
//!
//! Page templates use Go-template syntax and are compiled from files embedded
//! at build time. Contexts are plain [`gtmpl::Value`] objects; entry bodies
//! are markdown rendered to HTML at display time.

mod context;
mod engine;
mod markdown;

pub use context::{PageContext, comment_value, entry_detail_value, entry_summary_value};
pub use engine::TemplateEngine;
pub use markdown::{escape_html, markdown_to_html};
