//! Recover a JSON document from free-form model text.
//!
//! Models often wrap structured output in code fences, prefix it with a label,
//! or surround it with prose. Extraction tries progressively looser strategies
//! and returns the first document that parses.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?").expect("fence regex should be valid"));

const PREFIXES: [&str; 5] = [
    "JSON:",
    "Response:",
    "Answer:",
    "Here's the JSON:",
    "The JSON is:",
];

/// Extract the first JSON value recoverable from `text`.
///
/// Order of attempts:
/// 1. the whole (cleaned) text
/// 2. the outermost `{ ... }` slice
/// 3. the outermost `[ ... ]` slice
/// 4. any single line starting with `{` or `[`
pub fn extract_json(text: &str) -> Option<Value> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(value) = parse(cleaned) {
        return Some(value);
    }
    if let Some(value) = slice_between(cleaned, '{', '}').and_then(parse) {
        return Some(value);
    }
    if let Some(value) = slice_between(cleaned, '[', ']').and_then(parse) {
        return Some(value);
    }

    cleaned
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{') || line.starts_with('['))
        .find_map(parse)
}

/// Extract a JSON object; arrays and scalars are rejected.
pub fn extract_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    match extract_json(text)? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn clean(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(found) = FENCE_OPEN_RE.find(text) {
        text = &text[found.end()..];
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }
    text = text.trim();
    for prefix in PREFIXES {
        if let Some(stripped) = text.strip_prefix(prefix) {
            text = stripped.trim();
        }
    }
    text
}

fn slice_between(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn parse(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}
