//! Durable run diagnostics: action log, validation history, length
//! report. These are the only structures that outlive a run.

use crate::length::LengthReport;
use crate::validator::ValidationResult;
use galley_core::{ActionLog, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const ACTION_LOG_FILE: &str = "action_log.json";
const VALIDATION_FILE: &str = "validation.json";
const LENGTH_REPORT_FILE: &str = "length_report.txt";

/// Most recent entries kept in the validation history file.
const VALIDATION_HISTORY_CAP: usize = 50;

/// Writes per-run diagnostic artifacts into one directory.
#[derive(Debug, Clone)]
pub struct DiagnosticsWriter {
    dir: PathBuf,
}

impl DiagnosticsWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Persist the action log for one run, replacing any previous one.
    pub fn write_action_log(&self, log: &ActionLog) -> Result<PathBuf> {
        let path = self.prepare(ACTION_LOG_FILE)?;
        fs::write(&path, serde_json::to_string_pretty(log)?)?;
        info!(path = %path.display(), actions = log.total_actions, "wrote action log");
        Ok(path)
    }

    /// Append one validation result to the history file, keeping only
    /// the most recent entries.
    pub fn append_validation(&self, result: &ValidationResult) -> Result<PathBuf> {
        let path = self.prepare(VALIDATION_FILE)?;
        // a damaged history file must never block a run
        let mut history: Vec<ValidationResult> = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "validation history unreadable, starting fresh");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        history.push(result.clone());
        if history.len() > VALIDATION_HISTORY_CAP {
            let excess = history.len() - VALIDATION_HISTORY_CAP;
            history.drain(..excess);
        }
        fs::write(&path, serde_json::to_string_pretty(&history)?)?;
        Ok(path)
    }

    /// Persist the rendered length report.
    pub fn write_length_report(&self, report: &LengthReport) -> Result<PathBuf> {
        let path = self.prepare(LENGTH_REPORT_FILE)?;
        fs::write(&path, report.render())?;
        Ok(path)
    }

    fn prepare(&self, file: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self.dir.join(file))
    }
}
