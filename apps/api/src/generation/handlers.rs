//! Axum route handlers for the generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::analysis::analyze_post;
use crate::generation::generator::generate_posts;
use crate::generation::rewrite::{rewrite_content, RewriteRequest, RewriteResponse};
use crate::models::analysis::{PostAnalysis, PostAnalysisRequest};
use crate::models::post::{GeneratedPost, GenerationRequest};
use crate::state::AppState;

/// POST /api/generate-posts
///
/// One stored record per variant, each with one content per requested platform.
pub async fn handle_generate_posts(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<Vec<GeneratedPost>>, AppError> {
    let posts = generate_posts(state.store.as_ref(), state.llm.as_ref(), request).await?;
    Ok(Json(posts))
}

/// POST /api/rewrite-content
pub async fn handle_rewrite_content(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    let response = rewrite_content(state.store.as_ref(), state.llm.as_ref(), &request).await?;
    Ok(Json(response))
}

/// POST /api/analyze-post
pub async fn handle_analyze_post(
    State(state): State<AppState>,
    Json(request): Json<PostAnalysisRequest>,
) -> Result<Json<PostAnalysis>, AppError> {
    let analysis = analyze_post(state.store.as_ref(), state.llm.as_ref(), request).await?;
    Ok(Json(analysis))
}
