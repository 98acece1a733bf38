//! Paragraph segmenter: blank-line splitting with a minimum-length filter.

use galley_core::config::SegmenterConfig;
use galley_core::ParagraphArena;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static RE_MULTI_BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

/// Splits raw text into trimmed paragraphs on blank-line boundaries.
pub struct Segmenter {
    min_chars: usize,
}

impl Segmenter {
    pub fn new(config: &SegmenterConfig) -> Self {
        Self { min_chars: config.min_paragraph_chars }
    }

    /// Segment text into an ordered paragraph arena.
    ///
    /// Paragraphs with `min_chars` characters or fewer are discarded.
    /// Lengths are counted in Unicode scalar values, not bytes. Empty
    /// input yields an empty arena, never an error.
    pub fn segment(&self, text: &str) -> ParagraphArena {
        let mut texts = Vec::new();
        for part in RE_BLANK_LINE.split(text) {
            let trimmed = part.trim();
            if trimmed.chars().count() > self.min_chars {
                texts.push(trimmed.to_string());
            }
        }
        debug!(paragraphs = texts.len(), "segmented document");
        ParagraphArena::from_texts(texts)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(&SegmenterConfig::default())
    }
}

/// Join paragraphs with blank lines, squeezing any leftover runs.
pub fn rejoin(paragraphs: &[&str]) -> String {
    let joined = paragraphs.join("\n\n");
    squeeze_blank_lines(&joined).trim().to_string()
}

/// Collapse runs of three or more newline-ish lines into one blank line.
pub fn squeeze_blank_lines(text: &str) -> String {
    RE_MULTI_BLANK.replace_all(text, "\n\n").to_string()
}
