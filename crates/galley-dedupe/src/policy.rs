//! Survivor selection and same-block detection for flagged pairs.

use galley_core::config::KnownEntities;
use regex::Regex;
use std::sync::LazyLock;

static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+ [A-Z][a-z]+").unwrap());
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static RE_MILESTONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"完成|实现|达到|获得|参与|组织|领导").unwrap());

/// Heuristic information density: named-entity-like tokens, digit runs
/// and milestone verbs per character, scaled by 100.
pub fn info_density(text: &str) -> f64 {
    let chars = text.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let entities = RE_ENTITY.find_iter(text).count();
    let digits = RE_DIGITS.find_iter(text).count();
    let milestones = RE_MILESTONE.find_iter(text).count();
    (entities + digits + milestones) as f64 / chars as f64 * 100.0
}

/// Decides which member of a flagged pair survives and whether the pair
/// sits inside one entity's block.
pub struct ResolutionPolicy {
    entities: Vec<String>,
}

impl ResolutionPolicy {
    pub fn new(entities: &KnownEntities) -> Self {
        Self { entities: entities.names.clone() }
    }

    /// Returns `(kept, replaced)` paragraph indices. The denser
    /// paragraph survives; on a tie the earlier one does.
    pub fn choose_survivor(&self, i: usize, j: usize, ti: &str, tj: &str) -> (usize, usize) {
        if info_density(ti) >= info_density(tj) {
            (i, j)
        } else {
            (j, i)
        }
    }

    /// The first configured entity mentioned by both paragraphs, if
    /// any. Configuration order makes the pick deterministic.
    pub fn shared_entity(&self, a: &str, b: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|name| a.contains(name.as_str()) && b.contains(name.as_str()))
            .map(|name| name.as_str())
    }
}
