//! Concurrent dispatch of rephrase requests to the generation backend.

use galley_core::{rewrite_or_keep, Generator};
use serde_json::json;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::error;

const REPHRASE_ROLE: &str = "Writer";

const REPHRASE_SYSTEM_PROMPT: &str =
    "你是一名专业的学校申请顾问，负责改写重复的段落内容，使其更具针对性和独特性。";

/// One paragraph scheduled for an entity-specific rewrite.
#[derive(Debug, Clone)]
pub struct RephraseJob {
    pub index: usize,
    pub entity: String,
    pub text: String,
}

fn rephrase_instruction(entity: &str, paragraph: &str) -> String {
    format!(
        "请将以下段落改写为针对 {entity} 的独有角度，避免模板化表述：\n\n\
         原段落：{paragraph}\n\n\
         改写要求：\n\
         1. 必须包含该校的具体项目名、课程设置、社团活动、设施特色等独有信息\n\
         2. 禁止使用\"学术卓越、领导力培养、校友网络强大\"等通用模板句\n\
         3. 补充该校的具体文化特色、地理位置、寄宿/走读制度等细节\n\
         4. 保持专业、客观的语调，避免营销性语言\n\
         5. 字数与原段落相近\n\
         6. 输出纯文本，不使用任何Markdown格式\n\n\
         改写后的段落："
    )
}

/// Runs every job against the generator concurrently. Each job falls
/// back to its original text on failure, so the result always carries
/// one entry per job, sorted by paragraph index.
pub async fn dispatch_rephrases(
    generator: Arc<dyn Generator>,
    jobs: Vec<RephraseJob>,
) -> Vec<(usize, String)> {
    let mut set = JoinSet::new();
    for job in jobs {
        let generator = Arc::clone(&generator);
        set.spawn(async move {
            let payload = json!({ "content": rephrase_instruction(&job.entity, &job.text) });
            let text = rewrite_or_keep(
                generator.as_ref(),
                REPHRASE_ROLE,
                REPHRASE_SYSTEM_PROMPT,
                payload,
                &job.text,
            )
            .await;
            (job.index, text)
        });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(pair) => results.push(pair),
            Err(err) => error!(error = %err, "rephrase task panicked"),
        }
    }
    results.sort_by_key(|(index, _)| *index);
    results
}
