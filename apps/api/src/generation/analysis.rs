//! Post analysis: scores a post 0–100 on five axes plus improvement tips.
//!
//! Unlike generation there is no plain-text fallback: a reply that is not
//! well-formed score JSON fails the request.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::credentials::resolve_api_key;
use crate::errors::AppError;
use crate::generation::prompts::build_analysis_prompt;
use crate::llm_client::prompts::MARKETING_SYSTEM;
use crate::llm_client::{ChatProvider, CompletionRequest};
use crate::models::analysis::{PostAnalysis, PostAnalysisRequest};
use crate::store::Store;

const MAX_SCORE: u8 = 100;

/// Score JSON requested by the analysis prompt. Missing fields default to 0 / empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct AnalysisReply {
    #[serde(default)]
    engagement_score: u8,
    #[serde(default)]
    readability_score: u8,
    #[serde(default)]
    tone_consistency_score: u8,
    #[serde(default)]
    platform_best_practices_score: u8,
    #[serde(default)]
    overall_score: u8,
    #[serde(default)]
    improvement_tips: Vec<String>,
}

impl AnalysisReply {
    fn scores(&self) -> [u8; 5] {
        [
            self.engagement_score,
            self.readability_score,
            self.tone_consistency_score,
            self.platform_best_practices_score,
            self.overall_score,
        ]
    }
}

fn parse_analysis_reply(text: &str) -> Result<AnalysisReply, String> {
    let value = serde_json::from_str::<Value>(text).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("reply is not a JSON object".to_string());
    }
    let reply: AnalysisReply = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if let Some(score) = reply.scores().into_iter().find(|s| *s > MAX_SCORE) {
        return Err(format!("score {score} is outside 0-{MAX_SCORE}"));
    }
    Ok(reply)
}

pub async fn analyze_post(
    store: &dyn Store,
    llm: &dyn ChatProvider,
    request: PostAnalysisRequest,
) -> Result<PostAnalysis, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let api_key = resolve_api_key(store, request.ai_provider).await?;
    let prompt = build_analysis_prompt(&request.content, request.platform);

    let reply = llm
        .complete(CompletionRequest {
            provider: request.ai_provider,
            model: &request.ai_model,
            api_key: &api_key,
            system: MARKETING_SYSTEM,
            prompt: &prompt,
        })
        .await
        .map_err(|e| AppError::Llm(format!("AI analysis failed: {e}")))?;

    let scores = parse_analysis_reply(&reply).map_err(|reason| {
        warn!("Unusable analysis reply: {reason}");
        AppError::Llm("Failed to parse AI analysis response".to_string())
    })?;

    let analysis = PostAnalysis {
        id: Uuid::new_v4().to_string(),
        content: request.content,
        platform: request.platform,
        engagement_score: scores.engagement_score,
        readability_score: scores.readability_score,
        tone_consistency_score: scores.tone_consistency_score,
        platform_best_practices_score: scores.platform_best_practices_score,
        overall_score: scores.overall_score,
        improvement_tips: scores.improvement_tips,
        created_at: Utc::now(),
    };

    store.insert_analysis(&analysis).await?;
    info!(
        "Stored analysis {} for {} (overall {})",
        analysis.id,
        analysis.platform.as_str(),
        analysis.overall_score
    );

    Ok(analysis)
}
