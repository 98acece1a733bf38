//! Line protocol over the canonical section title anchors.

use galley_core::section::Section;
use galley_segment::squeeze_blank_lines;
use tracing::{debug, info};

/// Drops every repeated section block, keeping only the first occurrence
/// of each title anchor.
///
/// Lines are matched against the canonical titles after trimming. A line
/// equal to an already-seen title switches into discard mode until the next
/// unseen title; prose outside any recognized section is discarded too,
/// while blank lines always survive as separators.
pub fn dedupe_sections(text: &str) -> String {
    let mut kept_lines: Vec<&str> = Vec::new();
    let mut seen: Vec<Section> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let stripped = line.trim();
        if let Some(section) = Section::match_title(stripped) {
            if seen.contains(&section) {
                debug!(title = %section, "dropping repeated section block");
                in_section = false;
            } else {
                seen.push(section);
                in_section = true;
                kept_lines.push(stripped);
            }
        } else if in_section || stripped.is_empty() {
            kept_lines.push(stripped);
        }
    }

    info!(kept = seen.len(), "section deduplication kept first occurrences");
    squeeze_blank_lines(&kept_lines.join("\n"))
        .trim()
        .to_string()
}

/// Splits a report into `(section, body)` pairs by title anchor lines.
///
/// A trimmed line equal to a canonical title opens that section; subsequent
/// non-empty lines accumulate into its body until the next anchor. Prose
/// before the first anchor is ignored, and a body line that merely mentions
/// a title inline is plain body text.
pub fn split_section_bodies(text: &str) -> Vec<(Section, String)> {
    let mut bodies: Vec<(Section, String)> = Vec::new();
    let mut current: Option<(Section, Vec<&str>)> = None;

    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if let Some(section) = Section::match_title(stripped) {
            if let Some((open, lines)) = current.take() {
                bodies.push((open, lines.join("\n")));
            }
            current = Some((section, Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(stripped);
        }
    }
    if let Some((open, lines)) = current.take() {
        bodies.push((open, lines.join("\n")));
    }
    bodies
}
