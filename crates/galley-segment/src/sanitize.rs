//! Prose cleanup: markup characters, emoji and placeholder markers.

use crate::segmenter::squeeze_blank_lines;
use regex::Regex;
use std::sync::LazyLock;

static RE_MD_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*`\[\]()|]").unwrap());
static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*-\s+").unwrap());
static RE_EMOJI: LazyLock<Regex> = LazyLock::new(|| Regex::new(
    "[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\
     \u{1F1E0}-\u{1F1FF}\u{2702}-\u{27B0}\u{1F900}-\u{1F9FF}\
     \u{1FA00}-\u{1FA6F}\u{1FA70}-\u{1FAFF}\u{2600}-\u{26FF}\
     \u{2B50}\u{2B55}]+"
).unwrap());
static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"  +").unwrap());
static RE_MARKDOWN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\*\*.*?\*\*|\*.*?\*|#+|^\s*[-*+]\s|^\s*\d+\.\s|\|.*?\||```").unwrap()
});

/// Placeholder markers left behind by earlier drafting steps.
const PLACEHOLDERS: [&str; 4] = ["（由面谈补充）", "（TBD）", "（TODO）", "（待家长确认）"];

/// Remove markdown markup characters and list markers, preserving line
/// structure.
pub fn strip_markup(text: &str) -> String {
    let stripped = RE_MD_CHARS.replace_all(text, "");
    RE_BULLET.replace_all(&stripped, "").to_string()
}

/// Remove emoji and collapse the double spaces they leave behind.
pub fn strip_emoji(text: &str) -> String {
    let stripped = RE_EMOJI.replace_all(text, "");
    RE_MULTI_SPACE.replace_all(&stripped, " ").to_string()
}

/// Remove placeholder markers.
pub fn strip_placeholders(text: &str) -> String {
    let mut result = text.to_string();
    for marker in PLACEHOLDERS {
        result = result.replace(marker, "");
    }
    result
}

/// Full cleanup pass applied before segmentation.
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut result = strip_markup(text);
    result = strip_emoji(&result);
    result = strip_placeholders(&result);
    squeeze_blank_lines(&result).trim().to_string()
}

/// True if the text still carries markdown markup.
pub fn contains_markup(text: &str) -> bool {
    RE_MARKDOWN.is_match(text)
}

/// True if the text contains emoji.
pub fn contains_emoji(text: &str) -> bool {
    RE_EMOJI.is_match(text)
}

/// True if the text contains a placeholder marker.
pub fn contains_placeholder(text: &str) -> bool {
    PLACEHOLDERS.iter().any(|marker| text.contains(marker))
}
