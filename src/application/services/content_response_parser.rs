use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::markdown_blocks::new_key;
use crate::domain::{GeneratedContent, RowInput, slugify};

const META_DESCRIPTION_MAX_CHARS: usize = 160;
const MAX_FALLBACK_TAGS: usize = 5;

static CONTENT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"content"\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap());
static TITLE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"title"\s*:\s*"(?:[^"\\]|\\.)*"\s*,?"#).unwrap());
static META_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"metaDescription"\s*:\s*"(?:[^"\\]|\\.)*"\s*,?"#).unwrap()
});
static TAGS_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"tags"\s*:\s*\[[^\]]*\]\s*,?"#).unwrap());
static CONTENT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*\{?\s*"content"\s*:\s*""#).unwrap());

/// Outcome of one parser in the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseAttempt {
    Parsed(GeneratedContent),
    Continue,
}

type Parser = fn(&str, &RowInput) -> ParseAttempt;

/// Tried in order; the first parser that recognises the shape decides the result.
const PARSER_CHAIN: [(&str, Parser); 3] = [
    ("strict_json", parse_strict_json),
    ("content_field", parse_content_field),
    ("raw_text", parse_raw_text),
];

/// Turns an upstream completion into article content, tolerating the ways the
/// model breaks the requested JSON shape. `None` means nothing usable came back.
pub fn parse_generated_content(raw: &str, row: &RowInput) -> Option<GeneratedContent> {
    for (name, parser) in PARSER_CHAIN {
        let ParseAttempt::Parsed(mut content) = parser(raw, row) else {
            tracing::debug!(parser = name, "Parser did not match, trying next");
            continue;
        };
        if content.content.trim().is_empty() {
            tracing::warn!(parser = name, "Generated content has an empty body");
            return None;
        }
        if content.slug.is_empty() {
            content.slug = fallback_slug(&row.headline);
        }
        tracing::debug!(parser = name, "Parsed generated content");
        return Some(content);
    }
    None
}

/// Slug for titles with no ASCII-representable characters.
fn fallback_slug(headline: &str) -> String {
    match slugify(headline) {
        slug if !slug.is_empty() => slug,
        _ => format!("post-{}", new_key()),
    }
}

pub fn parse_strict_json(raw: &str, row: &RowInput) -> ParseAttempt {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw.trim()) else {
        return ParseAttempt::Continue;
    };
    let (Some(title), Some(body)) = (string_field(&map, "title"), string_field(&map, "content"))
    else {
        return ParseAttempt::Continue;
    };

    let body = if body.contains("\"title\"") {
        tracing::warn!("Generated content contains nested JSON, extracting body");
        extract_clean_content(body)
    } else {
        body.trim().to_string()
    };

    let title = match title.trim() {
        "" => row.headline.clone(),
        t => t.to_string(),
    };
    let meta_description = string_field(&map, "metaDescription")
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_meta_description(row));

    let tags: Vec<String> = map
        .get("tags")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let tags = if tags.is_empty() {
        tags_from_key_points(&row.key_points)
    } else {
        tags
    };

    ParseAttempt::Parsed(GeneratedContent::new(title, body, meta_description, tags))
}

pub fn parse_content_field(raw: &str, row: &RowInput) -> ParseAttempt {
    match CONTENT_FIELD.captures(raw).and_then(|c| c.get(1)) {
        Some(body) => ParseAttempt::Parsed(fallback_content(unescape(body.as_str()), row)),
        None => ParseAttempt::Continue,
    }
}

pub fn parse_raw_text(raw: &str, row: &RowInput) -> ParseAttempt {
    ParseAttempt::Parsed(fallback_content(raw.trim().to_string(), row))
}

/// Recovers the article body from a `content` value that itself holds JSON.
pub fn extract_clean_content(content: &str) -> String {
    if let Ok(Value::Object(inner)) = serde_json::from_str::<Value>(content.trim()) {
        if let Some(body) = string_field(&inner, "content") {
            return body.trim().to_string();
        }
    }

    let mut cleaned = content.to_string();
    for fragment in [&TITLE_FRAGMENT, &META_FRAGMENT, &TAGS_FRAGMENT] {
        cleaned = fragment.replace_all(&cleaned, "").into_owned();
    }

    let had_content_key = CONTENT_KEY.is_match(&cleaned);
    let cleaned = CONTENT_KEY.replace(&cleaned, "");
    let mut cleaned = cleaned
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
        .trim_end_matches(',')
        .trim_end();
    if had_content_key {
        cleaned = cleaned.strip_suffix('"').unwrap_or(cleaned);
    }

    unescape(cleaned).trim().to_string()
}

pub fn fallback_meta_description(row: &RowInput) -> String {
    let full = format!("{}: {}", row.headline.trim(), row.key_points.trim());
    match full.char_indices().nth(META_DESCRIPTION_MAX_CHARS) {
        Some((cut, _)) => full[..cut].trim_end().to_string(),
        None => full,
    }
}

pub fn tags_from_key_points(key_points: &str) -> Vec<String> {
    key_points
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .take(MAX_FALLBACK_TAGS)
        .map(str::to_string)
        .collect()
}

fn fallback_content(body: String, row: &RowInput) -> GeneratedContent {
    GeneratedContent::new(
        row.headline.clone(),
        body,
        fallback_meta_description(row),
        tags_from_key_points(&row.key_points),
    )
}

fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\\"", "\"")
}
