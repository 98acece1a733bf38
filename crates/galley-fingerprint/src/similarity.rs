//! Pairwise similarity: cosine over fingerprints plus lexical corroboration.

use crate::fingerprint::Fingerprint;
use galley_core::config::SimilarityConfig;
use std::collections::HashSet;
use tracing::error;

/// Cosine similarity between two fingerprints.
///
/// Returns 0.0 when either norm is zero. Fingerprints from one
/// vectorizer always agree on dimensionality; a mismatch is an internal
/// invariant violation and scores 0.0 rather than panicking.
pub fn cosine_similarity(a: &Fingerprint, b: &Fingerprint) -> f32 {
    debug_assert_eq!(a.dimension(), b.dimension());
    if a.dimension() != b.dimension() {
        error!(left = a.dimension(), right = b.dimension(), "fingerprint dimension mismatch");
        return 0.0;
    }
    let dot: f32 = a.values().zip(b.values()).map(|(x, y)| x * y).sum();
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// All distinct character windows of exactly `len` scalar values.
fn char_windows(text: &str, len: usize) -> HashSet<String> {
    let chars: Vec<char> = text.chars().collect();
    if len == 0 || chars.len() < len {
        return HashSet::new();
    }
    chars.windows(len).map(|w| w.iter().collect()).collect()
}

/// Lexical corroboration: the two texts share at least `min_count`
/// distinct character windows of `window_chars` length.
pub fn shares_key_phrases(a: &str, b: &str, window_chars: usize, min_count: usize) -> bool {
    let wa = char_windows(a, window_chars);
    if wa.is_empty() {
        return false;
    }
    let wb = char_windows(b, window_chars);
    wa.intersection(&wb).count() >= min_count
}

/// A scored paragraph pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityEdge {
    pub i: usize,
    pub j: usize,
    pub score: f32,
    pub corroborated: bool,
}

/// Applies the configured near-duplicate thresholds to paragraph pairs.
pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Score one pair. Corroboration is only computed once the score
    /// reaches the corroborated threshold; below it the flag cannot
    /// matter.
    pub fn evaluate(
        &self,
        i: usize,
        j: usize,
        fa: &Fingerprint,
        fb: &Fingerprint,
        ta: &str,
        tb: &str,
    ) -> SimilarityEdge {
        let score = cosine_similarity(fa, fb);
        let corroborated = score >= self.config.corroborated_threshold
            && shares_key_phrases(
                ta,
                tb,
                self.config.shared_window_chars,
                self.config.shared_window_count,
            );
        SimilarityEdge { i, j, score, corroborated }
    }

    /// The near-duplicate rule: at or above the duplicate threshold
    /// outright, or corroborated at the lower threshold.
    pub fn is_near_duplicate(&self, edge: &SimilarityEdge) -> bool {
        edge.score >= self.config.duplicate_threshold || edge.corroborated
    }
}
