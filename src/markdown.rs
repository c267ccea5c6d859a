use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{Arena, ComrakOptions, format_html, parse_document};
use once_cell::sync::Lazy;

pub const DEFAULT_CODE_LANGUAGE: &str = "text";

static MARKDOWN_OPTIONS: Lazy<ComrakOptions> = Lazy::new(|| {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    // Raw HTML from the content is escaped in `rewrite_tree`; only the
    // generated code blocks are passed through untouched.
    options.render.unsafe_ = true;
    options
});

/// Render assistant content to HTML for the `.md` container.
pub fn markdown_to_html(md: &str) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, md, &MARKDOWN_OPTIONS);
    rewrite_tree(root);

    let mut html = Vec::new();
    if let Err(err) = format_html(root, &MARKDOWN_OPTIONS, &mut html) {
        tracing::warn!(error = %err, "markdown rendering failed, showing escaped text");
        return format!("<p>{}</p>", escape_html(md));
    }
    // Raw HTML is escaped by now, so every anchor left is a markdown link.
    String::from_utf8_lossy(&html).replace("<a href=\"", LINK_OPEN)
}

const LINK_OPEN: &str = "<a target=\"_blank\" rel=\"noopener noreferrer\" href=\"";

fn rewrite_tree<'a>(root: &'a AstNode<'a>) {
    for node in root.descendants() {
        let mut data = node.data.borrow_mut();
        let replacement = match &data.value {
            NodeValue::CodeBlock(block) => Some(NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal: code_block_html(code_language(&block.info), &block.literal),
            })),
            NodeValue::HtmlBlock(block) => Some(NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: block.block_type,
                literal: escape_html(&block.literal),
            })),
            NodeValue::HtmlInline(raw) => Some(NodeValue::HtmlInline(escape_html(raw))),
            NodeValue::Link(link) | NodeValue::Image(link) if is_dangerous_url(&link.url) => {
                let mut value = data.value.clone();
                if let NodeValue::Link(link) | NodeValue::Image(link) = &mut value {
                    link.url.clear();
                }
                Some(value)
            }
            _ => None,
        };
        if let Some(value) = replacement {
            data.value = value;
        }
    }
}

/// Script-bearing schemes that `unsafe_` rendering would otherwise pass
/// through. Inline images stay allowed.
fn is_dangerous_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    let allowed_data = ["data:image/png", "data:image/gif", "data:image/jpeg", "data:image/webp"];
    if allowed_data.iter().any(|prefix| url.starts_with(prefix)) {
        return false;
    }
    ["javascript:", "vbscript:", "file:", "data:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// Language label for a fence info string such as `rust title="x"`.
pub fn code_language(info: &str) -> &str {
    info.split_whitespace()
        .next()
        .map(|lang| lang.strip_prefix("language-").unwrap_or(lang))
        .filter(|lang| !lang.is_empty())
        .unwrap_or(DEFAULT_CODE_LANGUAGE)
}

fn code_block_html(language: &str, code: &str) -> String {
    let code = code.strip_suffix('\n').unwrap_or(code);
    format!(
        "<div class=\"code-block\">\
         <div class=\"code-block-header\"><span class=\"code-block-lang\">{}</span></div>\
         <pre><code>{}</code></pre>\
         </div>\n",
        escape_html(language),
        escape_html(code)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = Vec::with_capacity(raw.len());
    // Writing into a Vec cannot fail.
    let _ = comrak::html::escape(&mut escaped, raw.as_bytes());
    String::from_utf8_lossy(&escaped).into_owned()
}
