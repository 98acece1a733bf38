//! Fixed-order document assembly from per-section drafts.

use galley_core::error::GalleyError;
use galley_core::section::Section;
use galley_core::Result;
use galley_segment::clean;
use std::collections::HashMap;
use tracing::info;

/// Assembles the full report from per-section drafts: one template,
/// canonical order, every body sanitized on the way in.
///
/// Each section is emitted as its title line followed directly by the
/// body, so the anchor stays attached to its leading paragraph through
/// downstream segmentation. A missing section is an error naming it;
/// drafts for unknown titles are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn new() -> Self {
        ReportAssembler
    }

    pub fn assemble(&self, drafts: &HashMap<Section, String>) -> Result<String> {
        let mut parts = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL {
            let body = drafts
                .get(&section)
                .ok_or_else(|| GalleyError::MissingSection(section.title().to_string()))?;
            parts.push(format!("{}\n{}", section.title(), clean(body)));
        }
        info!(sections = parts.len(), "assembled report in canonical order");
        Ok(parts.join("\n\n"))
    }

    /// Same as [`ReportAssembler::assemble`] for drafts keyed by the
    /// literal title string.
    pub fn assemble_titled(&self, drafts: &HashMap<String, String>) -> Result<String> {
        let mut by_section: HashMap<Section, String> = HashMap::new();
        for (title, body) in drafts {
            if let Some(section) = Section::match_title(title.trim()) {
                by_section.insert(section, body.clone());
            }
        }
        self.assemble(&by_section)
    }
}
