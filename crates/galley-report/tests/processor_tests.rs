//! End-to-end runs of the report processor over assembled drafts.

use async_trait::async_trait;
use galley_core::config::GalleyConfig;
use galley_core::error::GalleyError;
use galley_core::{Generator, Section};
use galley_report::ReportProcessor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PARA_UCC: &str =
    "UCC的机器人项目和编程课程在多伦多地区声誉卓著，学生可以随时使用实验室设施。";
const PARA_CONTROL: &str =
    "学生的数学和物理竞赛成绩优异，曾获得省级奖项，并组织过校内的志愿者活动。";

const BODIES: [&str; 6] = [
    "学生在家庭氛围中养成了阅读与音乐的习惯，父母重视传统与价值观的传承。",
    "家长倾向多伦多市区的走读学校，预算与通勤都在可接受的范围之内。",
    "学生的编程经验与该校的机器人项目互补，校园的创新文化也十分契合。",
    "学术准备上以化学与生物为主，辅以艺术中心的绘画项目作为补充。",
    "申请时间线包括SSAT备考、文书撰写与两轮模拟面试的具体安排。",
    "录取后建议尽早联系宿舍安排，并且规划好暑期的衔接事宜。",
];

struct ScriptedGenerator {
    response: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn ok(response: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { response: Some(response.into()), calls: AtomicUsize::new(0) })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self { response: None, calls: AtomicUsize::new(0) })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        _role: &str,
        _system_prompt: &str,
        _payload: &serde_json::Value,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(anyhow::anyhow!("generation backend unavailable")),
        }
    }
}

fn draft_with(bodies: [&str; 6]) -> String {
    Section::ALL
        .iter()
        .zip(bodies)
        .map(|(section, body)| format!("{}\n{}", section.title(), body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn clean_draft() -> String {
    draft_with(BODIES)
}

#[tokio::test]
async fn same_block_duplicates_survive_as_one_original_and_one_rewrite() {
    let generator = ScriptedGenerator::ok("改写后的段落，强调UCC独有的学院制与导师辅导体系。");
    let processor = ReportProcessor::new(GalleyConfig::default());
    let family = format!("{}\n\n{PARA_UCC}\n\n{PARA_UCC}", BODIES[0]);
    let draft = draft_with([&family, BODIES[1], BODIES[2], BODIES[3], BODIES[4], BODIES[5]]);

    let processed = processor.process(generator.clone(), &draft).await.unwrap();

    assert_eq!(processed.log.summary.rephrase_count, 1);
    assert_eq!(processed.log.summary.drop_count, 0);
    assert_eq!(generator.call_count(), 1);
    assert_eq!(processed.text.matches(PARA_UCC).count(), 1);
    assert!(processed.text.contains("改写后的段落"));
    assert!(processed.validation.is_valid);
}

#[tokio::test]
async fn cross_section_duplicates_are_dropped_and_the_guard_expands() {
    let generator = ScriptedGenerator::failing();
    let processor = ReportProcessor::new(GalleyConfig::default());
    let family = format!("{}\n\n{PARA_CONTROL}", BODIES[0]);
    let academic = format!("{}\n\n{PARA_CONTROL}", BODIES[3]);
    let draft = draft_with([&family, BODIES[1], BODIES[2], &academic, BODIES[4], BODIES[5]]);

    let processed = processor.process(generator.clone(), &draft).await.unwrap();

    assert_eq!(processed.log.summary.drop_count, 1);
    assert_eq!(processed.log.summary.rephrase_count, 0);
    assert_eq!(processed.text.matches(PARA_CONTROL).count(), 1);
    // the drop crossed the reduction threshold, so one expansion pass
    // ran and fell back to the deduped text
    assert!(processed.reduction.reduction_pct > 8.0);
    assert_eq!(generator.call_count(), 1);
    assert!(processed.validation.is_valid);
}

#[tokio::test]
async fn an_inline_duplicate_title_is_a_fatal_rejection() {
    let generator = ScriptedGenerator::failing();
    let processor = ReportProcessor::new(GalleyConfig::default());
    let positioning = "该部分与家庭与学生背景一章相互呼应，家长倾向多伦多市区的走读学校。";
    let draft = draft_with([BODIES[0], positioning, BODIES[2], BODIES[3], BODIES[4], BODIES[5]]);

    match processor.process(generator, &draft).await {
        Err(GalleyError::Structure(report)) => {
            assert_eq!(report.duplicated.len(), 1);
            assert_eq!(report.duplicated[0].title, "家庭与学生背景");
            assert_eq!(report.duplicated[0].count, 2);
            assert!(report.missing.is_empty());
        }
        other => panic!("expected structural rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn a_duplicated_chapter_is_salvaged_before_the_gate() {
    let generator = ScriptedGenerator::failing();
    let processor = ReportProcessor::new(GalleyConfig::default());
    let draft = format!(
        "{}\n\n家庭与学生背景\n这里是重复章节的旧版本，再次描述温哥华的寄宿学校、图书馆与食堂等资源。",
        clean_draft()
    );

    let processed = processor.process(generator, &draft).await.unwrap();

    assert!(processed.validation.is_valid);
    assert_eq!(processed.text.matches("家庭与学生背景").count(), 1);
    assert!(!processed.text.contains("旧版本"));
}

#[tokio::test]
async fn over_ceiling_drafts_are_compressed_end_to_end() {
    let compressed = draft_with([
        "家庭背景已精简。",
        "定位已精简。",
        "匹配度已精简。",
        "学术准备已精简。",
        "流程策略已精简。",
        "延伸建议已精简。",
    ]);
    let generator = ScriptedGenerator::ok(compressed);
    let mut config = GalleyConfig::default();
    config.length.ceiling_chars = 200;
    let processor = ReportProcessor::new(config);

    let processed = processor.process(generator.clone(), &clean_draft()).await.unwrap();

    assert_eq!(generator.call_count(), 1);
    assert!(processed.text.contains("家庭背景已精简。"));
    assert!(processed.validation.is_valid);
}

#[tokio::test]
async fn failed_compression_never_loses_content() {
    let generator = ScriptedGenerator::ok("压".repeat(400));
    let mut config = GalleyConfig::default();
    config.length.ceiling_chars = 200;
    let processor = ReportProcessor::new(config);

    let processed = processor.process(generator.clone(), &clean_draft()).await.unwrap();

    assert_eq!(generator.call_count(), 1);
    for body in BODIES {
        assert!(processed.text.contains(body));
    }
    assert!(processed.validation.is_valid);
}

#[tokio::test]
async fn diagnostics_are_persisted_for_each_run() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::failing();
    let processor = ReportProcessor::new(GalleyConfig::default()).with_diagnostics(dir.path());

    processor.process(generator, &clean_draft()).await.unwrap();

    assert!(dir.path().join("action_log.json").exists());
    assert!(dir.path().join("validation.json").exists());
    assert!(dir.path().join("length_report.txt").exists());
}
