use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of reconciliation action taken on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Rephrase,
    Drop,
    TemplateRewrite,
}

/// One audit record. Appended for every action taken; never mutated.
///
/// Pair actions carry `i`/`j`/`similarity`; template rewrites carry
/// `paragraph`/`phrase`. Unused fields stay off the wire. The wire
/// names (`sim`, `paragraph_idx`, `template`) are the report format
/// downstream tooling already parses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub j: Option<usize>,
    #[serde(rename = "sim", skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    #[serde(rename = "paragraph_idx", skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<usize>,
    #[serde(rename = "template", skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    pub reason: String,
}

impl ResolutionAction {
    pub fn rephrase(i: usize, j: usize, similarity: f32, reason: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Rephrase,
            i: Some(i),
            j: Some(j),
            similarity: Some(similarity),
            paragraph: None,
            phrase: None,
            reason: reason.into(),
        }
    }

    pub fn drop(i: usize, j: usize, similarity: f32, reason: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Drop,
            i: Some(i),
            j: Some(j),
            similarity: Some(similarity),
            paragraph: None,
            phrase: None,
            reason: reason.into(),
        }
    }

    pub fn template_rewrite(
        paragraph: usize,
        phrase: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind: ActionKind::TemplateRewrite,
            i: None,
            j: None,
            similarity: None,
            paragraph: Some(paragraph),
            phrase: Some(phrase.into()),
            reason: reason.into(),
        }
    }
}

/// Per-kind action counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub rephrase_count: usize,
    pub drop_count: usize,
    pub template_rewrite_count: usize,
}

/// The persisted action log for one document run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub timestamp: String,
    pub run_id: Uuid,
    pub total_actions: usize,
    pub actions: Vec<ResolutionAction>,
    pub summary: ActionSummary,
}

impl ActionLog {
    pub fn new(actions: Vec<ResolutionAction>) -> Self {
        let summary = ActionSummary {
            rephrase_count: count_kind(&actions, ActionKind::Rephrase),
            drop_count: count_kind(&actions, ActionKind::Drop),
            template_rewrite_count: count_kind(&actions, ActionKind::TemplateRewrite),
        };
        Self {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            run_id: Uuid::new_v4(),
            total_actions: actions.len(),
            actions,
            summary,
        }
    }
}

fn count_kind(actions: &[ResolutionAction], kind: ActionKind) -> usize {
    actions.iter().filter(|a| a.kind == kind).count()
}
