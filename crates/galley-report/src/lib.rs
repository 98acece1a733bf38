//! Assembly, structural validation, length control, and quality scoring
//! for reconciled application reports.

pub mod artifacts;
pub mod assembler;
pub mod length;
pub mod processor;
pub mod quality;
pub mod sections;
pub mod validator;

pub use artifacts::DiagnosticsWriter;
pub use assembler::ReportAssembler;
pub use length::{count_cjk_chars, LengthController, LengthRegime, LengthReport, SectionLength};
pub use processor::{ProcessedReport, ReportProcessor};
pub use quality::{QualityAssessor, QualityReport, SectionWordCount};
pub use sections::{dedupe_sections, split_section_bodies};
pub use validator::{StructuralValidator, ValidationResult};
