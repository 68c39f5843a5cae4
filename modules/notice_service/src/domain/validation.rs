//! Sanitization and validation of notice settings
//!
//! Raw input arrives untyped (form fields or JSON); everything here is total:
//! malformed values are normalized, never rejected. The only rejected input is
//! an inverted date range.

use crate::contract::{NoticeError, NoticeSettings};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub const FIELD_CONTENT: &str = "content";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";
pub const FIELD_ALWAYS_SHOW: &str = "always_show";

#[allow(clippy::expect_used)]
static SCRIPT_STYLE_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(?:script|style)[^>]*?>.*?</(?:script|style)\s*>")
        .expect("script/style pattern is valid")
});

#[allow(clippy::expect_used)]
static TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));

#[allow(clippy::expect_used)]
static PERCENT_OCTETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("octet pattern is valid"));

/// Filter rich text down to common post markup.
///
/// Paragraphs, emphasis, links, lists, headings, quotes, code, images and
/// tables survive; scripts, styles, event handlers and `javascript:` URLs do not.
pub fn sanitize_content(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut builder = ammonia::Builder::default();
    builder
        .link_rel(None)
        .add_generic_attributes(&["class", "id"])
        .add_tag_attributes("a", &["target"]);

    builder.clean(html).to_string()
}

/// Reduce a single-line text field to plain text.
///
/// Tags are stripped (script/style together with their contents), line breaks,
/// tabs and whitespace runs collapse to one space, percent-encoded octets are
/// removed and the result is trimmed.
pub fn sanitize_text_field(input: &str) -> String {
    let mut text = if input.contains('<') {
        let without_blocks = SCRIPT_STYLE_BLOCKS.replace_all(input, "");
        TAGS.replace_all(&without_blocks, "").into_owned()
    } else {
        input.to_string()
    };

    text = WHITESPACE_RUNS.replace_all(&text, " ").trim().to_string();

    // Removing one octet can expose another, e.g. "%2%541"
    while PERCENT_OCTETS.is_match(&text) {
        text = PERCENT_OCTETS.replace_all(&text, "").into_owned();
    }

    text.trim().to_string()
}

/// Whether the value is exactly `YYYY-MM-DD` (ASCII digits, no calendar check)
pub fn is_date_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Sanitize a date field; anything that is not `YYYY-MM-DD` becomes empty
pub fn normalize_date(input: &str) -> String {
    let text = sanitize_text_field(input);
    if is_date_format(&text) {
        text
    } else {
        String::new()
    }
}

/// Render a loosely typed scalar as text
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Loose truthiness used when reading stored values
pub fn coerce_stored_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Strict boolean coercion for submitted input: `"false"` is false as well
pub fn coerce_input_bool(value: &Value) -> bool {
    match value {
        Value::String(s) if s.eq_ignore_ascii_case("false") => false,
        other => coerce_stored_bool(other),
    }
}

fn fields(raw: &Value) -> Option<&Map<String, Value>> {
    raw.as_object()
}

/// Normalize a stored option value into a complete record.
///
/// `None` or a non-object value yields the defaults; missing keys are filled
/// with their defaults and `always_show` is coerced to a boolean.
pub fn normalize_stored(raw: Option<&Value>) -> NoticeSettings {
    let Some(map) = raw.and_then(fields) else {
        return NoticeSettings::default();
    };

    let text = |key: &str| map.get(key).map(value_to_text).unwrap_or_default();

    NoticeSettings {
        content: text(FIELD_CONTENT),
        start_date: text(FIELD_START_DATE),
        end_date: text(FIELD_END_DATE),
        always_show: map.get(FIELD_ALWAYS_SHOW).is_some_and(coerce_stored_bool),
    }
}

/// Sanitize untyped input into a record ready for validation
pub fn sanitize_input(raw: &Value) -> NoticeSettings {
    let empty = Map::new();
    let map = fields(raw).unwrap_or(&empty);

    let text = |key: &str| map.get(key).map(value_to_text).unwrap_or_default();

    NoticeSettings {
        content: sanitize_content(&text(FIELD_CONTENT)),
        start_date: normalize_date(&text(FIELD_START_DATE)),
        end_date: normalize_date(&text(FIELD_END_DATE)),
        always_show: map.get(FIELD_ALWAYS_SHOW).is_some_and(coerce_input_bool),
    }
}

/// Reject an inverted date range unless the window is bypassed
pub fn validate_date_range(settings: &NoticeSettings) -> Result<(), NoticeError> {
    if settings.always_show || settings.start_date.is_empty() || settings.end_date.is_empty() {
        return Ok(());
    }

    if settings.end_date < settings.start_date {
        return Err(NoticeError::invalid_date_range());
    }

    Ok(())
}
