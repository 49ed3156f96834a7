//! Conversion of generated markdown into the content store's rich-text blocks.
//!
//! Only the subset the generator is asked to produce is understood: `#`..`###`
//! headings, `-`/`*` bullets, numbered lines, `**bold**` and `[text](url)` links.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

pub const BULLET: &str = "• ";
pub const STRONG_MARK: &str = "strong";

static BOLD_OR_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|\[([^\]]+)\]\(([^)\s]+)\)").unwrap());
static BOLD_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStyle {
    Normal,
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub style: BlockStyle,
    pub mark_defs: Vec<MarkDef>,
    pub children: Vec<Span>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub text: String,
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkDef {
    #[serde(rename = "_type")]
    pub kind: &'static str,
    #[serde(rename = "_key")]
    pub key: String,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inline {
    BoldOnly,
    BoldAndLinks,
}

impl Block {
    fn new(style: BlockStyle, mark_defs: Vec<MarkDef>, children: Vec<Span>) -> Self {
        Self {
            kind: "block",
            key: new_key(),
            style,
            mark_defs,
            children,
        }
    }
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::marked(text, Vec::new())
    }

    fn marked(text: impl Into<String>, marks: Vec<String>) -> Self {
        Self {
            kind: "span",
            key: new_key(),
            text: text.into(),
            marks,
        }
    }
}

impl MarkDef {
    fn link(href: impl Into<String>) -> Self {
        Self {
            kind: "link",
            key: new_key(),
            href: href.into(),
        }
    }
}

/// Fresh 12-hex-digit key for blocks, spans and mark definitions.
pub fn new_key() -> String {
    let mut key = Uuid::new_v4().simple().to_string();
    key.truncate(12);
    key
}

pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    markdown
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(line_to_block)
        .collect()
}

fn line_to_block(line: &str) -> Block {
    for (prefix, style) in [
        ("### ", BlockStyle::H3),
        ("## ", BlockStyle::H2),
        ("# ", BlockStyle::H1),
    ] {
        if let Some(heading) = line.strip_prefix(prefix) {
            return Block::new(style, Vec::new(), vec![Span::plain(heading.trim())]);
        }
    }

    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        let mut mark_defs = Vec::new();
        let mut children = vec![Span::plain(BULLET)];
        children.extend(parse_inline(item.trim(), Inline::BoldOnly, &mut mark_defs));
        return Block::new(BlockStyle::Normal, mark_defs, children);
    }

    let mode = if NUMBERED.is_match(line) {
        Inline::BoldOnly
    } else {
        Inline::BoldAndLinks
    };
    let mut mark_defs = Vec::new();
    let children = parse_inline(line, mode, &mut mark_defs);
    Block::new(BlockStyle::Normal, mark_defs, children)
}

fn parse_inline(text: &str, mode: Inline, mark_defs: &mut Vec<MarkDef>) -> Vec<Span> {
    let pattern = match mode {
        Inline::BoldOnly => &*BOLD_ONLY,
        Inline::BoldAndLinks => &*BOLD_OR_LINK,
    };

    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Span::plain(&text[cursor..whole.start()]));
        }

        if let Some(bold) = caps.get(1) {
            spans.push(Span::marked(bold.as_str(), vec![STRONG_MARK.to_string()]));
        } else if let (Some(label), Some(href)) = (caps.get(2), caps.get(3)) {
            let link = MarkDef::link(href.as_str());
            spans.push(Span::marked(label.as_str(), vec![link.key.clone()]));
            mark_defs.push(link);
        }

        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Span::plain(&text[cursor..]));
    }

    spans
}
