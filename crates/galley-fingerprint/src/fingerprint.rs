//! Tagged-field paragraph fingerprints.

use galley_core::config::{BoilerplateTable, KeywordTaxonomy};
use serde::{Deserialize, Serialize};

/// Soft saturation point for the length feature, in characters.
const LENGTH_SCALE_CHARS: f32 = 500.0;

/// A paragraph fingerprint with named feature groups.
///
/// Layout is fixed within a run: one length feature, one density per
/// taxonomy category, one indicator per blacklisted phrase. Kept as
/// tagged fields rather than a flat vector so each dimension's
/// contribution to a similarity decision can be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// `min(chars / 500, 1.0)`, normalized with the rest.
    pub length: f32,
    /// Keyword occurrences per 100 characters, one per category.
    pub categories: Vec<f32>,
    /// 1.0 where the blacklisted phrase occurs verbatim, else 0.0.
    pub phrases: Vec<f32>,
}

impl Fingerprint {
    pub fn dimension(&self) -> usize {
        1 + self.categories.len() + self.phrases.len()
    }

    /// All feature values in layout order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        std::iter::once(self.length)
            .chain(self.categories.iter().copied())
            .chain(self.phrases.iter().copied())
    }

    pub fn norm(&self) -> f32 {
        self.values().map(|v| v * v).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.norm() == 0.0
    }

    /// L2-normalize in place; a zero vector is left untouched.
    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            self.length /= norm;
            for v in self.categories.iter_mut() {
                *v /= norm;
            }
            for v in self.phrases.iter_mut() {
                *v /= norm;
            }
        }
    }
}

/// Builds fingerprints from the configured taxonomy and blacklist.
pub struct Vectorizer {
    taxonomy: KeywordTaxonomy,
    phrases: Vec<String>,
}

impl Vectorizer {
    pub fn new(taxonomy: KeywordTaxonomy, boilerplate: &BoilerplateTable) -> Self {
        Self {
            taxonomy,
            phrases: boilerplate.phrases.clone(),
        }
    }

    /// Fixed dimensionality of every fingerprint this vectorizer emits.
    pub fn dimension(&self) -> usize {
        1 + self.taxonomy.len() + self.phrases.len()
    }

    /// Compute the fingerprint of one paragraph.
    pub fn fingerprint(&self, text: &str) -> Fingerprint {
        let chars = text.chars().count();
        let length = (chars as f32 / LENGTH_SCALE_CHARS).min(1.0);

        let categories = self
            .taxonomy
            .categories
            .iter()
            .map(|category| {
                if chars == 0 {
                    return 0.0;
                }
                let hits: usize = category
                    .keywords
                    .iter()
                    .map(|kw| text.matches(kw.as_str()).count())
                    .sum();
                hits as f32 / chars as f32 * 100.0
            })
            .collect();

        let phrases = self
            .phrases
            .iter()
            .map(|phrase| if text.contains(phrase.as_str()) { 1.0 } else { 0.0 })
            .collect();

        let mut fp = Fingerprint { length, categories, phrases };
        fp.l2_normalize();
        fp
    }

    /// Labelled feature values for audit output.
    pub fn explain(&self, fp: &Fingerprint) -> Vec<(String, f32)> {
        let mut out = Vec::with_capacity(self.dimension());
        out.push(("length".to_string(), fp.length));
        for (category, value) in self.taxonomy.categories.iter().zip(&fp.categories) {
            out.push((format!("category:{}", category.name), *value));
        }
        for (phrase, value) in self.phrases.iter().zip(&fp.phrases) {
            out.push((format!("phrase:{phrase}"), *value));
        }
        out
    }
}
