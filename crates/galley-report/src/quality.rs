//! Informational content-quality assessment.
//!
//! Unlike the structural gate this never fails a run; it flags leftover
//! markup, missing sections and under-budget bodies, and condenses them
//! into a 0-100 score.

use crate::length::count_cjk_chars;
use crate::sections::split_section_bodies;
use galley_core::config::SectionBudgets;
use galley_core::section::Section;
use galley_segment::{contains_emoji, contains_markup, contains_placeholder};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Character count of one section body against its budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionWordCount {
    pub section: Section,
    pub chars: usize,
    pub min_chars: usize,
    pub max_chars: usize,
    pub meets_minimum: bool,
    pub within_range: bool,
}

/// One run's quality verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub has_markup: bool,
    pub has_emoji: bool,
    pub has_placeholders: bool,
    pub sections_found: usize,
    pub section_word_counts: Vec<SectionWordCount>,
    pub issues: Vec<String>,
    pub needs_polish: bool,
    pub score: u32,
}

pub struct QualityAssessor {
    budgets: SectionBudgets,
}

impl QualityAssessor {
    pub fn new(budgets: &SectionBudgets) -> Self {
        Self { budgets: budgets.clone() }
    }

    pub fn assess(&self, text: &str) -> QualityReport {
        let has_markup = contains_markup(text);
        let has_emoji = contains_emoji(text);
        let has_placeholders = contains_placeholder(text);
        let sections_found = Section::ALL
            .iter()
            .filter(|section| text.contains(section.title()))
            .count();

        let bodies = split_section_bodies(text);
        let section_word_counts: Vec<SectionWordCount> = Section::ALL
            .iter()
            .map(|&section| {
                let chars = bodies
                    .iter()
                    .find(|(found, _)| *found == section)
                    .map(|(_, body)| count_cjk_chars(body))
                    .unwrap_or(0);
                let budget = self.budgets.for_section(section);
                SectionWordCount {
                    section,
                    chars,
                    min_chars: budget.min_chars,
                    max_chars: budget.max_chars,
                    meets_minimum: chars >= budget.min_chars,
                    within_range: budget.contains(chars),
                }
            })
            .collect();

        let mut issues = Vec::new();
        if has_markup {
            issues.push("包含Markdown符号".to_string());
        }
        if has_emoji {
            issues.push("包含Emoji表情".to_string());
        }
        if has_placeholders {
            issues.push("包含占位符".to_string());
        }
        if sections_found < Section::ALL.len() {
            issues.push(format!(
                "章节数量不足（期望{}个，实际{sections_found}个）",
                Section::ALL.len()
            ));
        }
        for count in &section_word_counts {
            if !count.meets_minimum {
                issues.push(format!(
                    "{}字数不足（期望{}字，实际{}字）",
                    count.section, count.min_chars, count.chars
                ));
            }
        }

        let score = score(
            has_markup,
            has_emoji,
            has_placeholders,
            sections_found,
            &section_word_counts,
        );
        let needs_polish = !issues.is_empty();
        info!(score, needs_polish, issues = issues.len(), "content quality assessed");

        QualityReport {
            has_markup,
            has_emoji,
            has_placeholders,
            sections_found,
            section_word_counts,
            issues,
            needs_polish,
            score,
        }
    }
}

fn score(
    has_markup: bool,
    has_emoji: bool,
    has_placeholders: bool,
    sections_found: usize,
    counts: &[SectionWordCount],
) -> u32 {
    let mut score: i32 = 100;
    if has_markup {
        score -= 20;
    }
    if has_emoji {
        score -= 15;
    }
    if has_placeholders {
        score -= 10;
    }
    if sections_found < Section::ALL.len() {
        score -= (Section::ALL.len() - sections_found) as i32 * 10;
    }
    for count in counts {
        if !count.meets_minimum {
            score -= 5;
        }
    }
    score.max(0) as u32
}
