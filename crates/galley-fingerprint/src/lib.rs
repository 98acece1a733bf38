//! Paragraph fingerprints and near-duplicate detection.

pub mod fingerprint;
pub mod similarity;

pub use fingerprint::{Fingerprint, Vectorizer};
pub use similarity::{cosine_similarity, shares_key_phrases, SimilarityEdge, SimilarityEngine};
