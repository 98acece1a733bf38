use serde::{Deserialize, Serialize};
use std::fmt;

/// The six required report sections, in canonical document order.
///
/// This enum is the single source of truth for section titles and their
/// ordering. Validation, assembly and budget lookup all go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    FamilyBackground,
    SchoolPositioning,
    MatchAnalysis,
    AcademicPreparation,
    ApplicationStrategy,
    PostAdmission,
}

impl Section {
    /// All sections in canonical order.
    pub const ALL: [Section; 6] = [
        Section::FamilyBackground,
        Section::SchoolPositioning,
        Section::MatchAnalysis,
        Section::AcademicPreparation,
        Section::ApplicationStrategy,
        Section::PostAdmission,
    ];

    /// The literal title string as it must appear in the document.
    pub fn title(&self) -> &'static str {
        match self {
            Section::FamilyBackground => "家庭与学生背景",
            Section::SchoolPositioning => "学校申请定位",
            Section::MatchAnalysis => "学生—学校匹配度",
            Section::AcademicPreparation => "学术与课外准备",
            Section::ApplicationStrategy => "申请流程与个性化策略",
            Section::PostAdmission => "录取后延伸建议",
        }
    }

    /// Position in the canonical order (0-based).
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Match a trimmed line against the known titles (exact equality).
    pub fn match_title(line: &str) -> Option<Section> {
        Self::ALL.iter().copied().find(|s| s.title() == line)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
