use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::credentials::AiProvider;
use crate::models::post::{default_model, Platform};

/// Request body for `POST /api/analyze-post`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostAnalysisRequest {
    pub content: String,
    pub platform: Platform,
    #[serde(default)]
    pub ai_provider: AiProvider,
    #[serde(default = "default_model")]
    pub ai_model: String,
}

/// Scored analysis of one post. All scores are in 0..=100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostAnalysis {
    pub id: String,
    pub content: String,
    pub platform: Platform,
    pub engagement_score: u8,
    pub readability_score: u8,
    pub tone_consistency_score: u8,
    pub platform_best_practices_score: u8,
    pub overall_score: u8,
    pub improvement_tips: Vec<String>,
    pub created_at: DateTime<Utc>,
}
