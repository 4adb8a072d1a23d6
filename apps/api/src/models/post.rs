use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::credentials::AiProvider;
use crate::models::DEFAULT_USER_ID;

/// Social network a post is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Tiktok,
    GoogleAds,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Tiktok => "tiktok",
            Platform::GoogleAds => "google_ads",
        }
    }

    /// Upper-cased wire name, used as the platform label inside prompts and exports.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    #[serde(rename = "General Update")]
    GeneralUpdate,
    #[serde(rename = "Promotional")]
    Promotional,
    #[serde(rename = "Product Launch")]
    ProductLaunch,
    #[serde(rename = "Event Announcement")]
    EventAnnouncement,
    #[serde(rename = "Customer Testimonial")]
    CustomerTestimonial,
    #[serde(rename = "Behind the Scenes")]
    BehindTheScenes,
    #[serde(rename = "Tips & Tricks")]
    TipsTricks,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::GeneralUpdate => "General Update",
            PostType::Promotional => "Promotional",
            PostType::ProductLaunch => "Product Launch",
            PostType::EventAnnouncement => "Event Announcement",
            PostType::CustomerTestimonial => "Customer Testimonial",
            PostType::BehindTheScenes => "Behind the Scenes",
            PostType::TipsTricks => "Tips & Tricks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneStyle {
    Professional,
    Friendly,
    Playful,
    Urgency,
    Inspirational,
}

impl ToneStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneStyle::Professional => "Professional",
            ToneStyle::Friendly => "Friendly",
            ToneStyle::Playful => "Playful",
            ToneStyle::Urgency => "Urgency",
            ToneStyle::Inspirational => "Inspirational",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceTarget {
    pub age_range: Option<String>,
    pub gender: Option<String>,
    pub interests: Option<String>,
    pub location: Option<String>,
}

/// Request body for `POST /api/generate-posts`. Stored verbatim on every
/// generated variant as `original_request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub platforms: Vec<Platform>,
    pub post_type: PostType,
    pub product_description: String,
    pub tone_style: ToneStyle,
    #[serde(default)]
    pub include_hashtags: bool,
    #[serde(default)]
    pub include_emojis: bool,
    #[serde(default)]
    pub include_seo_optimization: bool,
    #[serde(default)]
    pub seo_keywords: Option<String>,
    #[serde(default = "default_variants_count")]
    pub variants_count: u32,
    #[serde(default)]
    pub audience_target: Option<AudienceTarget>,
    #[serde(default)]
    pub ai_provider: AiProvider,
    #[serde(default = "default_model")]
    pub ai_model: String,
}

fn default_variants_count() -> u32 {
    1
}

pub(crate) fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// One platform's rendition inside a generated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub platform: Platform,
    pub content: String,
    pub hashtags: Option<Vec<String>>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub id: String,
    pub user_id: String,
    pub original_request: GenerationRequest,
    pub post_contents: Vec<PostContent>,
    pub variant_number: u32,
    pub created_at: DateTime<Utc>,
}

impl GeneratedPost {
    pub fn new(
        original_request: GenerationRequest,
        post_contents: Vec<PostContent>,
        variant_number: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            original_request,
            post_contents,
            variant_number,
            created_at: Utc::now(),
        }
    }
}
