//! Content rewriting: one prompt, one dispatch, reply returned verbatim.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::credentials::resolve_api_key;
use crate::errors::AppError;
use crate::generation::prompts::build_rewrite_prompt;
use crate::llm_client::prompts::MARKETING_SYSTEM;
use crate::llm_client::{ChatProvider, CompletionRequest};
use crate::models::credentials::AiProvider;
use crate::models::post::{default_model, Platform, ToneStyle};
use crate::store::Store;

/// Request body for `POST /api/rewrite-content`.
#[derive(Debug, Clone, Deserialize)]
pub struct RewriteRequest {
    pub original_content: String,
    pub tone_style: ToneStyle,
    pub platform: Platform,
    #[serde(default)]
    pub ai_provider: AiProvider,
    #[serde(default = "default_model")]
    pub ai_model: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewriteResponse {
    pub rewritten_content: String,
}

pub async fn rewrite_content(
    store: &dyn Store,
    llm: &dyn ChatProvider,
    request: &RewriteRequest,
) -> Result<RewriteResponse, AppError> {
    if request.original_content.trim().is_empty() {
        return Err(AppError::Validation(
            "original_content cannot be empty".to_string(),
        ));
    }

    let api_key = resolve_api_key(store, request.ai_provider).await?;
    let prompt = build_rewrite_prompt(
        &request.original_content,
        request.tone_style,
        request.platform,
    );

    let rewritten_content = llm
        .complete(CompletionRequest {
            provider: request.ai_provider,
            model: &request.ai_model,
            api_key: &api_key,
            system: MARKETING_SYSTEM,
            prompt: &prompt,
        })
        .await
        .map_err(|e| AppError::Llm(format!("AI rewrite failed: {e}")))?;

    info!(
        "Rewrote {} chars of {} content",
        request.original_content.len(),
        request.platform.as_str()
    );

    Ok(RewriteResponse { rewritten_content })
}
