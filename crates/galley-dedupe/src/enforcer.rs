//! Blacklisted template phrases: first occurrence stays, repeats get
//! the curated substitution.

use galley_core::config::BoilerplateTable;
use galley_core::{ParagraphArena, ResolutionAction};
use std::collections::HashMap;
use tracing::debug;

pub struct BoilerplateEnforcer {
    phrases: Vec<String>,
    rewrites: HashMap<String, String>,
}

impl BoilerplateEnforcer {
    pub fn new(table: &BoilerplateTable) -> Self {
        Self {
            phrases: table.phrases.clone(),
            rewrites: table.rewrites.clone(),
        }
    }

    /// Scans kept paragraphs in order and substitutes every occurrence
    /// of a blacklisted phrase after its first anywhere in the
    /// document. Phrases without a substitution entry are left
    /// untouched; the table is curated, never generated.
    pub fn enforce(&self, arena: &mut ParagraphArena) -> Vec<ResolutionAction> {
        let mut actions = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for index in arena.kept_indices() {
            let mut text = arena.text(index).to_string();
            let mut changed = false;

            for phrase in &self.phrases {
                let prior = seen.get(phrase.as_str()).copied().unwrap_or(0);
                let (rewritten, occurrences, substituted) =
                    substitute_after_first(&text, phrase, self.rewrites.get(phrase), prior);
                if occurrences == 0 {
                    continue;
                }
                *seen.entry(phrase.as_str()).or_insert(0) += occurrences;
                if substituted > 0 {
                    text = rewritten;
                    changed = true;
                    debug!(paragraph = index, phrase = %phrase, substituted, "substituted repeated template phrase");
                    for _ in 0..substituted {
                        actions.push(ResolutionAction::template_rewrite(
                            index,
                            phrase.clone(),
                            format!("模板句'{phrase}'重复出现"),
                        ));
                    }
                }
            }

            if changed {
                arena.replace_text(index, text);
            }
        }

        actions
    }
}

/// Rebuilds `text` keeping occurrences of `phrase` only while the
/// global count is still zero. Returns the new text, the number of
/// occurrences found, and the number substituted.
fn substitute_after_first(
    text: &str,
    phrase: &str,
    rewrite: Option<&String>,
    mut global_count: usize,
) -> (String, usize, usize) {
    let ranges: Vec<usize> = text.match_indices(phrase).map(|(start, _)| start).collect();
    if ranges.is_empty() {
        return (String::new(), 0, 0);
    }
    let Some(rewrite) = rewrite else {
        return (String::new(), ranges.len(), 0);
    };

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut substituted = 0;
    for start in &ranges {
        result.push_str(&text[cursor..*start]);
        if global_count == 0 {
            result.push_str(phrase);
        } else {
            result.push_str(rewrite);
            substituted += 1;
        }
        global_count += 1;
        cursor = start + phrase.len();
    }
    result.push_str(&text[cursor..]);
    (result, ranges.len(), substituted)
}
