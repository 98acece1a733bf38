//! The dedupe pass: segment, fingerprint, resolve pairs, enforce the
//! phrase blacklist, rebuild.

use crate::enforcer::BoilerplateEnforcer;
use crate::policy::ResolutionPolicy;
use crate::rewrite::{dispatch_rephrases, RephraseJob};
use chrono::Utc;
use galley_core::config::GalleyConfig;
use galley_core::{ActionLog, Generator, ResolutionAction};
use galley_fingerprint::{Fingerprint, SimilarityEngine, Vectorizer};
use galley_segment::{rejoin, Segmenter};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

const REASON_SAME_BLOCK: &str = "同校块内重复，改写为独有角度";
const REASON_CROSS_SECTION: &str = "跨章节重复，删除低信息量段落";

/// Result of one dedupe pass.
#[derive(Debug, Clone)]
pub struct DedupeOutcome {
    pub text: String,
    pub log: ActionLog,
}

/// Character-level accounting for one pass, checked against the
/// regression guard thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionSummary {
    pub timestamp: String,
    pub original_chars: usize,
    pub deduped_chars: usize,
    pub reduction_chars: i64,
    pub reduction_pct: f64,
    pub meets_criteria: bool,
    pub issues: Vec<String>,
}

pub struct DedupePipeline {
    segmenter: Segmenter,
    vectorizer: Vectorizer,
    engine: SimilarityEngine,
    policy: ResolutionPolicy,
    enforcer: BoilerplateEnforcer,
    max_reduction_pct: f64,
}

impl DedupePipeline {
    pub fn new(config: &GalleyConfig) -> Self {
        Self {
            segmenter: Segmenter::new(&config.segmenter),
            vectorizer: Vectorizer::new(config.taxonomy.clone(), &config.boilerplate),
            engine: SimilarityEngine::new(config.similarity.clone()),
            policy: ResolutionPolicy::new(&config.entities),
            enforcer: BoilerplateEnforcer::new(&config.boilerplate),
            max_reduction_pct: config.length.max_reduction_pct,
        }
    }

    /// One full dedupe pass over a document.
    ///
    /// Pair decisions are computed over the original paragraph texts
    /// and fingerprints; rewrites are dispatched once the scan is done
    /// and applied before blacklist enforcement, so enforcement always
    /// sees final paragraph text. The action log is ordered by pair
    /// index, not completion time.
    pub async fn run(&self, generator: Arc<dyn Generator>, text: &str) -> DedupeOutcome {
        let mut arena = self.segmenter.segment(text);
        info!(paragraphs = arena.len(), "starting dedupe pass");

        let fingerprints: Vec<Fingerprint> = arena
            .iter()
            .map(|p| self.vectorizer.fingerprint(&p.text))
            .collect();

        let mut actions: Vec<ResolutionAction> = Vec::new();
        let mut jobs: Vec<RephraseJob> = Vec::new();
        let mut pending: HashSet<usize> = HashSet::new();

        for i in 0..arena.len() {
            for j in (i + 1)..arena.len() {
                if !arena.is_kept(i) || !arena.is_kept(j) {
                    continue;
                }
                let edge = self.engine.evaluate(
                    i,
                    j,
                    &fingerprints[i],
                    &fingerprints[j],
                    arena.text(i),
                    arena.text(j),
                );
                if !self.engine.is_near_duplicate(&edge) {
                    continue;
                }

                let (_, replaced) = self.policy.choose_survivor(i, j, arena.text(i), arena.text(j));
                match self.policy.shared_entity(arena.text(i), arena.text(j)) {
                    Some(entity) => {
                        // one rewrite per paragraph, no matter how many
                        // pairs flag it
                        if pending.insert(replaced) {
                            jobs.push(RephraseJob {
                                index: replaced,
                                entity: entity.to_string(),
                                text: arena.text(replaced).to_string(),
                            });
                        }
                        debug!(i, j, score = edge.score, entity, "same-block duplicate, rephrasing");
                        actions.push(ResolutionAction::rephrase(i, j, edge.score, REASON_SAME_BLOCK));
                    }
                    None => {
                        arena.tombstone(replaced);
                        debug!(i, j, score = edge.score, dropped = replaced, "cross-section duplicate, dropping");
                        actions.push(ResolutionAction::drop(i, j, edge.score, REASON_CROSS_SECTION));
                    }
                }
            }
        }

        for (index, rewritten) in dispatch_rephrases(generator, jobs).await {
            if arena.is_kept(index) {
                arena.replace_text(index, rewritten);
            }
        }

        actions.extend(self.enforcer.enforce(&mut arena));

        let dropped = arena.len() - arena.kept_count();
        let rebuilt = rejoin(&arena.kept_texts());
        let log = ActionLog::new(actions);
        info!(
            total_actions = log.total_actions,
            rephrases = log.summary.rephrase_count,
            drops = log.summary.drop_count,
            template_rewrites = log.summary.template_rewrite_count,
            dropped_paragraphs = dropped,
            "dedupe pass complete"
        );
        DedupeOutcome { text: rebuilt, log }
    }

    /// Compares a document before and after a pass against the
    /// regression thresholds: the pass may not remove more than the
    /// configured share of characters, nor more than half the
    /// paragraphs.
    pub fn summarize_reduction(&self, original: &str, deduped: &str) -> ReductionSummary {
        let original_chars = original.chars().count();
        let deduped_chars = deduped.chars().count();
        let reduction_chars = original_chars as i64 - deduped_chars as i64;
        let reduction_pct = if original_chars > 0 {
            reduction_chars as f64 / original_chars as f64 * 100.0
        } else {
            0.0
        };

        let mut issues = Vec::new();
        if reduction_pct > self.max_reduction_pct {
            issues.push(format!("字数减少过多: {reduction_pct:.1}%"));
        }

        let original_paragraphs = self.segmenter.segment(original).len();
        let deduped_paragraphs = self.segmenter.segment(deduped).len();
        if (deduped_paragraphs as f64) < original_paragraphs as f64 * 0.5 {
            issues.push("删除段落过多，可能影响内容完整性".to_string());
        }

        ReductionSummary {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            original_chars,
            deduped_chars,
            reduction_chars,
            reduction_pct,
            meets_criteria: issues.is_empty(),
            issues,
        }
    }
}
