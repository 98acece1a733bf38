//! Core types for Galley: sections, configuration, paragraphs, actions.

pub mod action;
pub mod config;
pub mod error;
pub mod generate;
pub mod paragraph;
pub mod section;

pub use action::{ActionKind, ActionLog, ActionSummary, ResolutionAction};
pub use config::GalleyConfig;
pub use error::{GalleyError, Result};
pub use generate::{rewrite_or_keep, Generator};
pub use paragraph::{Paragraph, ParagraphArena};
pub use section::Section;
