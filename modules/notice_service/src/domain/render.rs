//! Front-end rendering of the notice blocks
//!
//! Two insertion points are rendered for the host page pipeline:
//! - the message block, which prints the stored content when it is non-empty
//! - the conditional block, which wraps nested content while the notice is active

use crate::contract::NoticeSettings;
use super::validation::sanitize_content;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MESSAGE_BLOCK_CLASS: &str = "wp-block-notiblock-message";
pub const CONDITIONAL_BLOCK_CLASS: &str = "wp-block-notiblock-conditional";

#[allow(clippy::expect_used)]
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph break pattern is valid"));

#[allow(clippy::expect_used)]
static BLOCK_LEVEL_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^</?(?:p|div|ul|ol|li|dl|dd|dt|h[1-6]|blockquote|pre|table|thead|tbody|tfoot|tr|td|th|caption|figure|figcaption|hr|section|article|aside|header|footer|nav|form|fieldset|address|details|summary)[\s/>]",
    )
    .expect("block level pattern is valid")
});

/// Escape text for use in HTML content or attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Turn blank-line separated text into paragraphs.
///
/// Blocks that already start with a block-level element are left alone; inside
/// a generated paragraph single newlines become `<br />`.
pub fn autop(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    PARAGRAPH_BREAK
        .split(&normalized)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_LEVEL_START.is_match(block) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block.replace('\n', "<br />\n"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrapper_classes(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|c| !c.is_empty()) {
        Some(extra) => format!("{} {}", base, escape_html(extra)),
        None => base.to_string(),
    }
}

/// Render the message block, `None` when no message is configured
pub fn render_message_block(settings: &NoticeSettings, extra_class: Option<&str>) -> Option<String> {
    if !settings.has_content() {
        return None;
    }

    let body = sanitize_content(&autop(&settings.content));
    Some(format!(
        "<div class=\"{}\">\n{}\n</div>",
        wrapper_classes(MESSAGE_BLOCK_CLASS, extra_class),
        body
    ))
}

/// Render the conditional block around already-rendered inner content.
///
/// Renders nothing while the notice is inactive or when the inner content is blank.
pub fn render_conditional_block(active: bool, inner_html: &str, extra_class: Option<&str>) -> Option<String> {
    if !active || inner_html.trim().is_empty() {
        return None;
    }

    Some(format!(
        "<div class=\"{}\">\n{}\n</div>",
        wrapper_classes(CONDITIONAL_BLOCK_CLASS, extra_class),
        inner_html
    ))
}
