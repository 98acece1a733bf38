use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galley_core::config::{BoilerplateTable, GalleyConfig};
use galley_core::{Generator, ParagraphArena};
use galley_dedupe::{info_density, BoilerplateEnforcer, DedupePipeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const SNIPPETS: [&str; 5] = [
    "Alex Chen在2023年获得3项省级奖项，并组织了5次志愿者活动，展现出持续的投入。",
    "UCC的机器人项目和编程课程在多伦多地区声誉卓著，学生可以随时使用实验室设施。",
    "该校秉持全人教育理念，强调传统与创新并重，校园文化包容多元。",
    "学生的数学和物理竞赛成绩优异，曾获得省级奖项，并参与过模拟联合国。",
    "申请时间线包括10月完成SSAT考试，11月提交申请材料，12月参加面试。",
];

struct CannedGenerator;

#[async_trait]
impl Generator for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(
        &self,
        _role: &str,
        _system_prompt: &str,
        _payload: &serde_json::Value,
    ) -> anyhow::Result<String> {
        Ok("改写后的段落，补充了该校独有的课程与设施细节。".to_string())
    }
}

fn generate_document(paragraphs: usize) -> String {
    let mut rng = StdRng::seed_from_u64(23);
    let parts: Vec<String> = (0..paragraphs)
        .map(|i| {
            let a = SNIPPETS[rng.gen_range(0..SNIPPETS.len())];
            let b = SNIPPETS[rng.gen_range(0..SNIPPETS.len())];
            format!("第{i}段：{a}{b}")
        })
        .collect();
    parts.join("\n\n")
}

fn bench_info_density(c: &mut Criterion) {
    let document = generate_document(200);
    let paragraphs: Vec<&str> = document.split("\n\n").collect();

    c.bench_function("info_density_200_paragraphs", |b| {
        b.iter(|| {
            let total: f64 = paragraphs.iter().map(|p| info_density(black_box(p))).sum();
            black_box(total)
        })
    });
}

fn bench_enforce_blacklist(c: &mut Criterion) {
    let enforcer = BoilerplateEnforcer::new(&BoilerplateTable::default());
    let texts: Vec<String> = generate_document(60).split("\n\n").map(str::to_string).collect();

    c.bench_function("enforce_blacklist_60_paragraphs", |b| {
        b.iter(|| {
            let mut arena = ParagraphArena::from_texts(texts.clone());
            black_box(enforcer.enforce(&mut arena))
        })
    });
}

fn bench_full_pass(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let pipeline = DedupePipeline::new(&GalleyConfig::default());
    let generator: Arc<dyn Generator> = Arc::new(CannedGenerator);
    let document = generate_document(40);

    c.bench_function("dedupe_pass_40_paragraphs", |b| {
        b.iter(|| {
            let outcome =
                runtime.block_on(pipeline.run(Arc::clone(&generator), black_box(&document)));
            black_box(outcome)
        })
    });
}

criterion_group!(benches, bench_info_density, bench_enforce_blacklist, bench_full_pass);
criterion_main!(benches);
