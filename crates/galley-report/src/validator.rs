//! Hard structural gate over the six canonical section titles.

use galley_core::error::{DuplicatedSection, GalleyError, StructureReport};
use galley_core::section::Section;
use galley_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of a structural scan: every title occurrence in textual order
/// plus the derived verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub total_sections: usize,
    pub expected_sections: usize,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
    pub is_valid: bool,
    pub has_duplicates: bool,
}

/// Counts occurrences of each canonical title and rejects any document that
/// does not carry all six exactly once, in canonical order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl StructuralValidator {
    pub fn new() -> Self {
        StructuralValidator
    }

    /// Scans `text` and reports every title occurrence without judging it
    /// fatal. Duplicate occurrences are all listed, in textual order.
    pub fn validate(&self, text: &str) -> ValidationResult {
        self.scan(text).0
    }

    /// Applies the gate: the document must contain each canonical title
    /// exactly once, with first appearances in canonical order.
    pub fn enforce(&self, text: &str) -> Result<ValidationResult> {
        let (result, report) = self.scan(text);
        if result.is_valid {
            info!(sections = result.total_sections, "structural validation passed");
            Ok(result)
        } else {
            warn!(%report, "rejecting structurally invalid report");
            Err(GalleyError::Structure(report))
        }
    }

    pub(crate) fn scan(&self, text: &str) -> (ValidationResult, StructureReport) {
        let mut occurrences: Vec<(usize, Section)> = Vec::new();
        for section in Section::ALL {
            for (pos, _) in text.match_indices(section.title()) {
                occurrences.push((pos, section));
            }
        }
        occurrences.sort_by_key(|&(pos, _)| pos);

        let mut duplicated = Vec::new();
        let mut missing = Vec::new();
        for section in Section::ALL {
            let count = occurrences.iter().filter(|&&(_, s)| s == section).count();
            if count == 0 {
                missing.push(section.title().to_string());
            } else if count > 1 {
                duplicated.push(DuplicatedSection {
                    title: section.title().to_string(),
                    count,
                });
            }
        }

        let mut first_seen: Vec<Section> = Vec::new();
        for &(_, section) in &occurrences {
            if !first_seen.contains(&section) {
                first_seen.push(section);
            }
        }
        let out_of_order = first_seen
            .windows(2)
            .any(|pair| pair[0].position() > pair[1].position());

        let report = StructureReport {
            duplicated,
            missing,
            out_of_order,
        };
        let result = ValidationResult {
            total_sections: occurrences.len(),
            expected_sections: Section::ALL.len(),
            found_sections: occurrences
                .iter()
                .map(|&(_, section)| section.title().to_string())
                .collect(),
            missing_sections: report.missing.clone(),
            is_valid: report.is_clean(),
            has_duplicates: !report.duplicated.is_empty(),
        };
        (result, report)
    }
}
