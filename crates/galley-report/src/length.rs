//! Whole-document length control against the page budget.

use crate::sections::split_section_bodies;
use chrono::Utc;
use galley_core::config::{LengthBudget, SectionBudgets};
use galley_core::section::Section;
use galley_core::{rewrite_or_keep, Generator};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

const LENGTH_ROLE: &str = "Writer";

const COMPRESS_SYSTEM_PROMPT: &str =
    "你是一名专业的学校申请顾问，负责压缩报告内容，优先精简重复表述和模板化语言。";

const EXPAND_SYSTEM_PROMPT: &str =
    "你是一名专业的学校申请顾问，负责扩写报告内容，增加信息性内容而非空话。";

/// Content-bearing characters: CJK unified ideographs only. Whitespace,
/// punctuation and Latin text do not count towards the page estimate.
pub fn count_cjk_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '\u{4e00}'..='\u{9fff}'))
        .count()
}

/// Where the document sits relative to the page budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthRegime {
    WithinRange,
    BelowMinimum,
    AboveTarget,
    AboveCeiling,
}

/// Character count of one section body against its budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionLength {
    pub section: Section,
    pub chars: usize,
    pub min_chars: usize,
    pub max_chars: usize,
    pub within_budget: bool,
}

/// The length report artifact for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LengthReport {
    pub timestamp: String,
    pub total_cjk_chars: usize,
    pub raw_chars: usize,
    pub estimated_pages: usize,
    pub target_pages: usize,
    pub min_pages: usize,
    pub max_pages: usize,
    pub regime: LengthRegime,
    pub sections: Vec<SectionLength>,
    pub recommendations: Vec<String>,
}

impl LengthReport {
    /// Render the report as the plain-text diagnostic artifact.
    pub fn render(&self) -> String {
        let mut lines = vec![
            "报告长度分析".to_string(),
            format!("生成时间: {}", self.timestamp),
            format!("总内容字数: {} 字", self.total_cjk_chars),
            format!("原始字符数: {}", self.raw_chars),
            format!(
                "估算页数: {} 页（目标 {}-{} 页）",
                self.estimated_pages, self.min_pages, self.max_pages
            ),
            String::new(),
            "各章节字数:".to_string(),
        ];
        for entry in &self.sections {
            let status = if entry.within_budget {
                "符合"
            } else if entry.chars < entry.min_chars {
                "不足"
            } else {
                "超出"
            };
            lines.push(format!(
                "- {}: {} 字（预算 {}-{}）{}",
                entry.section, entry.chars, entry.min_chars, entry.max_chars, status
            ));
        }
        lines.push(String::new());
        lines.push("调整建议:".to_string());
        for recommendation in &self.recommendations {
            lines.push(format!("- {recommendation}"));
        }
        lines.join("\n")
    }
}

/// Measures documents against the page budget and runs the mandatory
/// compression pass when the absolute ceiling is crossed.
///
/// Below-minimum and above-target documents are left untouched here;
/// expansion and compression towards the target range are hooks the
/// caller drives through [`LengthController::expand`].
pub struct LengthController {
    budget: LengthBudget,
    budgets: SectionBudgets,
}

impl LengthController {
    pub fn new(budget: &LengthBudget, budgets: &SectionBudgets) -> Self {
        Self {
            budget: budget.clone(),
            budgets: budgets.clone(),
        }
    }

    /// Estimated page count, rounded to the nearest page.
    pub fn estimate_pages(&self, text: &str) -> usize {
        let chars = count_cjk_chars(text);
        (chars as f64 / self.budget.chars_per_page as f64).round() as usize
    }

    /// Classify a document against the page range and the ceiling.
    pub fn regime(&self, text: &str) -> LengthRegime {
        if text.chars().count() > self.budget.ceiling_chars {
            return LengthRegime::AboveCeiling;
        }
        let pages = self.estimate_pages(text);
        if pages < self.budget.min_pages {
            LengthRegime::BelowMinimum
        } else if pages > self.budget.max_pages {
            LengthRegime::AboveTarget
        } else {
            LengthRegime::WithinRange
        }
    }

    /// Enforce the absolute ceiling.
    ///
    /// Documents at or under the ceiling pass through unchanged. Over
    /// the ceiling, one compression pass runs through the generator;
    /// if the result is still over the ceiling the original text is
    /// kept, so content is never silently lost.
    pub async fn control(&self, generator: &dyn Generator, text: &str) -> String {
        let raw_chars = text.chars().count();
        if raw_chars <= self.budget.ceiling_chars {
            info!(raw_chars, "document length within ceiling");
            return text.to_string();
        }

        warn!(
            raw_chars,
            ceiling = self.budget.ceiling_chars,
            "document over ceiling, running compression pass"
        );
        let payload = json!({ "content": self.compress_instruction(raw_chars, text) });
        let compressed =
            rewrite_or_keep(generator, LENGTH_ROLE, COMPRESS_SYSTEM_PROMPT, payload, text).await;
        let compressed_chars = compressed.chars().count();
        if compressed_chars > self.budget.ceiling_chars {
            warn!(
                compressed_chars,
                ceiling = self.budget.ceiling_chars,
                "compression left the document over ceiling, keeping original text"
            );
            return text.to_string();
        }
        info!(compressed_chars, "compression brought the document under ceiling");
        compressed
    }

    /// One expansion pass through the generator, keeping the input on
    /// failure. Used when dedupe removed too much content.
    pub async fn expand(&self, generator: &dyn Generator, text: &str) -> String {
        let payload = json!({ "content": expand_instruction(text) });
        rewrite_or_keep(generator, LENGTH_ROLE, EXPAND_SYSTEM_PROMPT, payload, text).await
    }

    /// Measure the document and every section body against the budgets.
    pub fn report(&self, text: &str) -> LengthReport {
        let total_cjk_chars = count_cjk_chars(text);
        let raw_chars = text.chars().count();
        let estimated_pages = self.estimate_pages(text);
        let bodies = split_section_bodies(text);

        let sections: Vec<SectionLength> = Section::ALL
            .iter()
            .map(|&section| {
                let chars = bodies
                    .iter()
                    .find(|(found, _)| *found == section)
                    .map(|(_, body)| count_cjk_chars(body))
                    .unwrap_or(0);
                let budget = self.budgets.for_section(section);
                SectionLength {
                    section,
                    chars,
                    min_chars: budget.min_chars,
                    max_chars: budget.max_chars,
                    within_budget: budget.contains(chars),
                }
            })
            .collect();

        let mut recommendations = Vec::new();
        if estimated_pages > self.budget.max_pages {
            let excess = (estimated_pages - self.budget.target_pages) * self.budget.chars_per_page;
            recommendations.push(format!("总页数 {estimated_pages} 超过目标，建议缩减 {excess} 字"));
        } else if estimated_pages < self.budget.min_pages {
            let deficit = (self.budget.target_pages - estimated_pages) * self.budget.chars_per_page;
            recommendations.push(format!("总页数 {estimated_pages} 不足，建议增加 {deficit} 字"));
        } else {
            recommendations.push(format!("总页数 {estimated_pages} 符合目标范围"));
        }
        for entry in sections.iter().filter(|entry| !entry.within_budget) {
            recommendations.push(format!(
                "{}当前 {} 字，预算 {}-{} 字",
                entry.section, entry.chars, entry.min_chars, entry.max_chars
            ));
        }

        LengthReport {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_cjk_chars,
            raw_chars,
            estimated_pages,
            target_pages: self.budget.target_pages,
            min_pages: self.budget.min_pages,
            max_pages: self.budget.max_pages,
            regime: self.regime(text),
            sections,
            recommendations,
        }
    }

    fn compress_instruction(&self, char_count: usize, text: &str) -> String {
        format!(
            "请对以下报告内容进行压缩重写，目标字数控制在目标页数范围内：\n\n\
             当前内容（{char_count}字）：{text}\n\n\
             压缩要求：\n\
             1. 优先精简重复表述和模板化语言\n\
             2. 保持所有6个章节的完整性\n\
             3. 保留核心信息和可执行建议\n\
             4. 删除冗余的修饰词和重复描述\n\
             5. 合并相似内容的段落\n\
             6. 保持专业、客观的语调\n\
             7. 输出纯文本，不使用Markdown格式\n\n\
             压缩后的内容："
        )
    }
}

fn expand_instruction(text: &str) -> String {
    format!(
        "请对以下报告内容进行增量扩写，重点补充\"匹配度分析\"与\"学术/活动建议\"章节的\
         可操作细节与评估依据：\n\n\
         当前内容：{text}\n\n\
         扩写要求：\n\
         1. 优先扩写\"学生—学校匹配度\"和\"学术与课外准备\"章节\n\
         2. 补充新的证据、执行步骤、具体建议\n\
         3. 避免空话套话，增加可核查的细节\n\
         4. 保持专业、客观的语调\n\
         5. 输出纯文本，不使用Markdown格式\n\n\
         扩写后的内容："
    )
}
