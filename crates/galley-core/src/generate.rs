//! The external text-generation seam.

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

/// Trait for the consumed text-generation capability.
///
/// The pipeline never generates text itself; paragraph rewrites and
/// whole-document expand/compress passes go through this seam. Payloads
/// are plain-text instructions and the response is expected to be plain
/// natural-language prose.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable generator name, used in logs.
    fn name(&self) -> &str;

    /// Run one generation call.
    async fn generate(
        &self,
        role: &str,
        system_prompt: &str,
        payload: &serde_json::Value,
    ) -> Result<String>;
}

/// Run a rewrite through the generator, falling back to `fallback` on
/// any error or blank response. Rewrites are best-effort and never fail
/// the pipeline; all rewrite call sites go through this combinator.
pub async fn rewrite_or_keep(
    generator: &dyn Generator,
    role: &str,
    system_prompt: &str,
    payload: serde_json::Value,
    fallback: &str,
) -> String {
    match generator.generate(role, system_prompt, &payload).await {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                warn!(generator = generator.name(), "blank generation response, keeping original text");
                fallback.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Err(err) => {
            warn!(generator = generator.name(), error = %err, "generation failed, keeping original text");
            fallback.to_string()
        }
    }
}
