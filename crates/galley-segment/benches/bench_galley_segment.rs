use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galley_segment::{clean, Segmenter};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn generate_document(paragraphs: usize) -> String {
    let sentences = [
        "学生在数学和物理方面表现出色，曾参与机器人竞赛并获得省级二等奖。",
        "该校的STEM项目丰富，实验室和图书馆设施完善，社团活动覆盖面广。",
        "建议加强英语写作能力，同时保持现有的学术优势和竞赛节奏。",
        "申请时间线包括十月完成标化考试，十一月提交申请材料，十二月参加面试。",
    ];
    let mut rng = StdRng::seed_from_u64(7);
    let mut doc = String::new();
    for _ in 0..paragraphs {
        let reps = rng.gen_range(1..4);
        for _ in 0..reps {
            doc.push_str(sentences[rng.gen_range(0..sentences.len())]);
        }
        doc.push_str("\n\n");
    }
    doc
}

fn bench_segment(c: &mut Criterion) {
    let doc_small = generate_document(40);
    let doc_large = generate_document(400);
    let segmenter = Segmenter::default();

    c.bench_function("segment_40_paragraphs", |b| {
        b.iter(|| black_box(segmenter.segment(black_box(&doc_small))))
    });
    c.bench_function("segment_400_paragraphs", |b| {
        b.iter(|| black_box(segmenter.segment(black_box(&doc_large))))
    });
}

fn bench_clean(c: &mut Criterion) {
    let doc = format!("## 标题\n\n{}", generate_document(40));
    c.bench_function("clean_40_paragraphs", |b| {
        b.iter(|| black_box(clean(black_box(&doc))))
    });
}

criterion_group!(benches, bench_segment, bench_clean);
criterion_main!(benches);
