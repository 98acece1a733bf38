use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A section title that appears more than once in the final text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicatedSection {
    pub title: String,
    pub count: usize,
}

/// Payload of a fatal structural rejection: exactly which titles are
/// duplicated or missing, so the failure is actionable without logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureReport {
    pub duplicated: Vec<DuplicatedSection>,
    pub missing: Vec<String>,
    pub out_of_order: bool,
}

impl StructureReport {
    pub fn is_clean(&self) -> bool {
        self.duplicated.is_empty() && self.missing.is_empty() && !self.out_of_order
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.duplicated.is_empty() {
            let dupes: Vec<String> = self
                .duplicated
                .iter()
                .map(|d| format!("{} x{}", d.title, d.count))
                .collect();
            parts.push(format!("duplicated sections: [{}]", dupes.join(", ")));
        }
        if !self.missing.is_empty() {
            parts.push(format!("missing sections: [{}]", self.missing.join(", ")));
        }
        if self.out_of_order {
            parts.push("sections out of order".to_string());
        }
        if parts.is_empty() {
            parts.push("structure ok".to_string());
        }
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum GalleyError {
    #[error("structural validation failed: {0}")]
    Structure(StructureReport),
    #[error("missing required section: {0}")]
    MissingSection(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GalleyError>;
