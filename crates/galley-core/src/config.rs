use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level pipeline configuration.
///
/// Plain data with serde derives; loading from a file or service is the
/// caller's concern. Defaults carry the domain constants the pipeline
/// was tuned with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleyConfig {
    pub segmenter: SegmenterConfig,
    pub similarity: SimilarityConfig,
    pub taxonomy: KeywordTaxonomy,
    pub boilerplate: BoilerplateTable,
    pub entities: KnownEntities,
    pub length: LengthBudget,
    pub budgets: SectionBudgets,
}

/// Paragraph segmentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Paragraphs at or below this many characters (Unicode scalar
    /// values) are discarded. The comparison is strict: a paragraph
    /// survives only if it has more than this many characters.
    pub min_paragraph_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { min_paragraph_chars: 20 }
    }
}

/// Near-duplicate detection thresholds.
///
/// These are inherited tuning constants, not derived values. Treat them
/// as a starting point to be re-tuned against a labeled corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Cosine score at or above which a pair is flagged outright.
    pub duplicate_threshold: f32,
    /// Cosine score at or above which a pair is flagged when the
    /// lexical corroboration check also passes.
    pub corroborated_threshold: f32,
    /// Window length, in characters, for the shared-substring check.
    pub shared_window_chars: usize,
    /// Minimum number of shared windows for corroboration.
    pub shared_window_count: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.92,
            corroborated_threshold: 0.85,
            shared_window_chars: 12,
            shared_window_count: 3,
        }
    }
}

/// One named keyword category of the domain taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

/// The keyword-category taxonomy driving the density features.
///
/// The category set is configuration, not logic: fingerprints get one
/// density dimension per category, in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTaxonomy {
    pub categories: Vec<KeywordCategory>,
}

impl KeywordTaxonomy {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn category(name: &str, keywords: &[&str]) -> KeywordCategory {
    KeywordCategory {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self {
            categories: vec![
                category("项目", &["STEM", "AP", "IB", "STEAM", "机器人", "编程", "科学实验"]),
                category("课程", &["数学", "物理", "化学", "生物", "计算机", "艺术", "音乐", "体育"]),
                category("活动", &["社团", "竞赛", "辩论", "模拟联合国", "学生会", "志愿者"]),
                category("设施", &["实验室", "图书馆", "体育馆", "艺术中心", "宿舍", "食堂"]),
                category("文化", &["传统", "价值观", "多元化", "包容性", "创新", "卓越"]),
                category("地理", &["多伦多", "温哥华", "蒙特利尔", "郊区", "市区", "寄宿", "走读"]),
            ],
        }
    }
}

/// Blacklisted boilerplate phrases and their curated substitutions.
///
/// `phrases` drives both the fingerprint indicator dimensions and the
/// enforcement scan; `rewrites` maps a phrase to the text substituted
/// for its second and later occurrences. A phrase without a rewrite
/// entry is counted but never altered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoilerplateTable {
    pub phrases: Vec<String>,
    pub rewrites: HashMap<String, String>,
}

impl BoilerplateTable {
    pub fn rewrite_for(&self, phrase: &str) -> Option<&str> {
        self.rewrites.get(phrase).map(|s| s.as_str())
    }
}

impl Default for BoilerplateTable {
    fn default() -> Self {
        let phrases = [
            "学术卓越，领导力培养，校友网络强大",
            "在学术能力方面表现突出，与学校特色高度契合",
            "展现领导力和创新思维",
            "全人教育理念",
            "国际化程度高",
            "我们的专业价值",
            "成功保障",
            "专业团队",
            "丰富经验",
            "优质服务",
        ];
        let rewrites = [
            (
                "学术卓越，领导力培养，校友网络强大",
                "该校在STEM教育方面具有独特优势，特别是在机器人竞赛和科学实验项目上表现突出",
            ),
            (
                "在学术能力方面表现突出，与学校特色高度契合",
                "学生的数学和物理专长与该校的AP课程体系高度匹配",
            ),
            (
                "展现领导力和创新思维",
                "通过环保义卖等具体项目展现了实际的组织能力和创新精神",
            ),
            ("全人教育理念", "该校注重学术与品格并重的教育理念"),
            ("国际化程度高", "该校拥有多元化的学生群体和丰富的国际交流项目"),
        ];
        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            rewrites: rewrites
                .iter()
                .map(|(p, r)| (p.to_string(), r.to_string()))
                .collect(),
        }
    }
}

/// Named entities used for same-block detection.
///
/// Two paragraphs belong to the same block when both mention the same
/// entity. Lookup preserves list order, so the first configured entity
/// shared by both paragraphs wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownEntities {
    pub names: Vec<String>,
}

impl Default for KnownEntities {
    fn default() -> Self {
        let names = [
            "Upper Canada College",
            "Havergal College",
            "St. Andrew's College",
            "UCC",
            "SAC",
        ];
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Whole-document length targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthBudget {
    pub target_pages: usize,
    pub min_pages: usize,
    pub max_pages: usize,
    /// Content characters per rendered page.
    pub chars_per_page: usize,
    /// Absolute ceiling in raw characters; crossing it forces a
    /// compression pass.
    pub ceiling_chars: usize,
    /// Maximum share of characters dedup may remove before the
    /// expansion guard triggers, in percent.
    pub max_reduction_pct: f64,
}

impl Default for LengthBudget {
    fn default() -> Self {
        Self {
            target_pages: 15,
            min_pages: 14,
            max_pages: 16,
            chars_per_page: 800,
            ceiling_chars: 15_500,
            max_reduction_pct: 8.0,
        }
    }
}

/// Character range one section body should land in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SectionBudget {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl SectionBudget {
    pub fn contains(&self, chars: usize) -> bool {
        chars >= self.min_chars && chars <= self.max_chars
    }
}

/// Per-section character budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionBudgets {
    pub family_background: SectionBudget,
    pub school_positioning: SectionBudget,
    pub match_analysis: SectionBudget,
    pub academic_preparation: SectionBudget,
    pub application_strategy: SectionBudget,
    pub post_admission: SectionBudget,
}

impl SectionBudgets {
    pub fn for_section(&self, section: Section) -> SectionBudget {
        match section {
            Section::FamilyBackground => self.family_background,
            Section::SchoolPositioning => self.school_positioning,
            Section::MatchAnalysis => self.match_analysis,
            Section::AcademicPreparation => self.academic_preparation,
            Section::ApplicationStrategy => self.application_strategy,
            Section::PostAdmission => self.post_admission,
        }
    }
}

impl Default for SectionBudgets {
    fn default() -> Self {
        Self {
            family_background: SectionBudget { min_chars: 900, max_chars: 1100 },
            school_positioning: SectionBudget { min_chars: 600, max_chars: 800 },
            match_analysis: SectionBudget { min_chars: 1200, max_chars: 1500 },
            academic_preparation: SectionBudget { min_chars: 900, max_chars: 1100 },
            application_strategy: SectionBudget { min_chars: 700, max_chars: 900 },
            post_admission: SectionBudget { min_chars: 250, max_chars: 350 },
        }
    }
}
