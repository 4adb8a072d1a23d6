//! Post generation: orchestrates the variant × platform pipeline.
//!
//! Flow: validate → resolve provider key → for each variant, for each platform:
//!       build prompt → dispatch → interpret reply → persist the variant.
//!
//! Strictly sequential. A failed dispatch aborts the request; variants that
//! were already persisted stay stored.

use tracing::info;

use crate::credentials::resolve_api_key;
use crate::errors::AppError;
use crate::generation::interpreter::interpret_reply;
use crate::generation::prompts::build_post_prompt;
use crate::llm_client::prompts::MARKETING_SYSTEM;
use crate::llm_client::{ChatProvider, CompletionRequest};
use crate::models::post::{GeneratedPost, GenerationRequest};
use crate::store::Store;

/// Rejects requests that can never produce a post. Runs before any I/O.
pub fn validate_request(request: &GenerationRequest) -> Result<(), AppError> {
    if request.platforms.is_empty() {
        return Err(AppError::Validation(
            "platforms must contain at least one platform".to_string(),
        ));
    }
    if request.product_description.trim().is_empty() {
        return Err(AppError::Validation(
            "product_description cannot be empty".to_string(),
        ));
    }
    if request.variants_count == 0 {
        return Err(AppError::Validation(
            "variants_count must be at least 1".to_string(),
        ));
    }
    if request.ai_model.trim().is_empty() {
        return Err(AppError::Validation("ai_model cannot be empty".to_string()));
    }
    Ok(())
}

/// Runs the generation pipeline and returns every persisted variant,
/// numbered 1..=variants_count, each holding one content per platform in
/// request order.
pub async fn generate_posts(
    store: &dyn Store,
    llm: &dyn ChatProvider,
    request: GenerationRequest,
) -> Result<Vec<GeneratedPost>, AppError> {
    validate_request(&request)?;
    let api_key = resolve_api_key(store, request.ai_provider).await?;

    info!(
        "Generating {} variant(s) for {} platform(s) via {}/{}",
        request.variants_count,
        request.platforms.len(),
        request.ai_provider.as_str(),
        request.ai_model
    );

    // Grows per stored variant; variants_count comes from the client.
    let mut generated = Vec::new();

    for variant_number in 1..=request.variants_count {
        let mut post_contents = Vec::with_capacity(request.platforms.len());

        for &platform in &request.platforms {
            let prompt = build_post_prompt(&request, platform, variant_number);
            let reply = llm
                .complete(CompletionRequest {
                    provider: request.ai_provider,
                    model: &request.ai_model,
                    api_key: &api_key,
                    system: MARKETING_SYSTEM,
                    prompt: &prompt,
                })
                .await
                .map_err(|e| AppError::Llm(format!("AI generation failed: {e}")))?;

            post_contents.push(interpret_reply(&reply, platform, &request));
        }

        let post = GeneratedPost::new(request.clone(), post_contents, variant_number);
        store.insert_generated_post(&post).await?;
        info!("Stored generated post {} (variant {})", post.id, variant_number);
        generated.push(post);
    }

    Ok(generated)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
