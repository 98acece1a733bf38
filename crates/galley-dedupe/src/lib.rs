//! Near-duplicate reconciliation for assembled report drafts.

pub mod enforcer;
pub mod pipeline;
pub mod policy;
pub mod rewrite;

pub use enforcer::BoilerplateEnforcer;
pub use pipeline::{DedupeOutcome, DedupePipeline, ReductionSummary};
pub use policy::{info_density, ResolutionPolicy};
pub use rewrite::{dispatch_rephrases, RephraseJob};
