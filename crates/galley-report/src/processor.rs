//! End-to-end report reconciliation.

use crate::artifacts::DiagnosticsWriter;
use crate::length::{LengthController, LengthReport};
use crate::quality::{QualityAssessor, QualityReport};
use crate::sections::dedupe_sections;
use crate::validator::{StructuralValidator, ValidationResult};
use galley_core::config::GalleyConfig;
use galley_core::error::GalleyError;
use galley_core::{ActionLog, Generator, Result};
use galley_dedupe::{DedupePipeline, ReductionSummary};
use galley_segment::clean;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything one accepted run produces.
#[derive(Debug, Clone)]
pub struct ProcessedReport {
    /// The cleaned, reconciled, section-delimited document text.
    pub text: String,
    pub log: ActionLog,
    pub reduction: ReductionSummary,
    pub validation: ValidationResult,
    pub length: LengthReport,
    pub quality: QualityReport,
}

/// Chains every reconciliation stage over one assembled draft.
pub struct ReportProcessor {
    config: GalleyConfig,
    dedupe: DedupePipeline,
    length: LengthController,
    validator: StructuralValidator,
    quality: QualityAssessor,
    diagnostics: Option<DiagnosticsWriter>,
}

impl ReportProcessor {
    pub fn new(config: GalleyConfig) -> Self {
        let dedupe = DedupePipeline::new(&config);
        let length = LengthController::new(&config.length, &config.budgets);
        let quality = QualityAssessor::new(&config.budgets);
        Self {
            config,
            dedupe,
            length,
            validator: StructuralValidator::new(),
            quality,
            diagnostics: None,
        }
    }

    /// Persist the action log, validation history and length report
    /// under `dir` after each run.
    pub fn with_diagnostics(mut self, dir: impl AsRef<Path>) -> Self {
        self.diagnostics = Some(DiagnosticsWriter::new(dir));
        self
    }

    /// Run the full chain on an assembled draft: sanitize, dedupe,
    /// reduction guard, length control, section dedupe, structural
    /// gate, quality assessment.
    ///
    /// A structural rejection fails the whole run; no partial output
    /// is returned. Diagnostics are persisted before the gate so a
    /// rejected run still leaves its artifacts behind.
    pub async fn process(
        &self,
        generator: Arc<dyn Generator>,
        draft: &str,
    ) -> Result<ProcessedReport> {
        let cleaned = clean(draft);
        let outcome = self.dedupe.run(Arc::clone(&generator), &cleaned).await;
        let reduction = self.dedupe.summarize_reduction(&cleaned, &outcome.text);

        let mut text = outcome.text;
        if reduction.reduction_pct > self.config.length.max_reduction_pct {
            warn!(
                reduction_pct = reduction.reduction_pct,
                "dedupe removed too much content, running expansion pass"
            );
            text = self.length.expand(generator.as_ref(), &text).await;
        }

        text = self.length.control(generator.as_ref(), &text).await;
        text = dedupe_sections(&text);

        let (validation, structure) = self.validator.scan(&text);
        let length = self.length.report(&text);
        if let Some(writer) = &self.diagnostics {
            writer.write_action_log(&outcome.log)?;
            writer.append_validation(&validation)?;
            writer.write_length_report(&length)?;
        }
        if !validation.is_valid {
            warn!(%structure, "rejecting structurally invalid report");
            return Err(GalleyError::Structure(structure));
        }

        let quality = self.quality.assess(&text);
        info!(
            pages = length.estimated_pages,
            score = quality.score,
            actions = outcome.log.total_actions,
            "report accepted"
        );

        Ok(ProcessedReport {
            text,
            log: outcome.log,
            reduction,
            validation,
            length,
            quality,
        })
    }
}
