// All LLM prompt text for generation, rewriting and analysis.
// The system instruction shared by every call lives in llm_client::prompts.

use crate::models::post::{GenerationRequest, Platform, ToneStyle};

/// Platform → guidance line appended to every prompt that targets a platform.
const PLATFORM_GUIDANCE: &[(Platform, &str)] = &[
    (
        Platform::Facebook,
        "Longer posts work well (up to 300 words). Include call-to-action. Focus on community building.",
    ),
    (
        Platform::Instagram,
        "Visual-first content. Keep captions engaging but concise. Stories format works well.",
    ),
    (
        Platform::Twitter,
        "Keep under 280 characters. Use trending hashtags. Be conversational and timely.",
    ),
    (
        Platform::Linkedin,
        "Professional tone. Can be longer (up to 1300 chars). Include industry insights.",
    ),
    (
        Platform::Tiktok,
        "Short, catchy content. Include trending sounds/challenges. Be creative and fun.",
    ),
    (
        Platform::GoogleAds,
        "Clear headline, compelling description. Include strong call-to-action. Focus on benefits.",
    ),
];

const GENERIC_GUIDANCE: &str = "Create engaging content appropriate for the platform.";

/// Closing instruction of every generation prompt.
pub const POST_JSON_INSTRUCTION: &str = r#"Please respond in this exact JSON format:
{
    "content": "The main post content here",
    "hashtags": ["hashtag1", "hashtag2", "hashtag3"],
    "meta_description": "SEO meta description if requested"
}

Only return valid JSON, no additional text."#;

/// Rewrite prompt template.
/// Replace: {tone}, {platform}, {original_content}, {guidance}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following post to improve engagement, clarity, and match a {tone} tone for {platform}:

Original Post: {original_content}

Platform Requirements: {guidance}

Please make the rewritten content more engaging while maintaining the core message."#;

/// Analysis prompt template.
/// Replace: {platform}, {content}, {guidance}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following post for {platform} and score it 0-100 for:
1. Engagement potential
2. Readability
3. Tone consistency
4. Platform best practices

Post Content: {content}

Platform Requirements: {guidance}

Please respond in this exact JSON format:
{
    "engagement_score": 85,
    "readability_score": 90,
    "tone_consistency_score": 80,
    "platform_best_practices_score": 75,
    "overall_score": 82,
    "improvement_tips": ["Tip 1", "Tip 2", "Tip 3"]
}

Scores must be whole numbers between 0 and 100. Only return valid JSON."#;

pub fn platform_guidance(platform: Platform) -> &'static str {
    PLATFORM_GUIDANCE
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, guidance)| *guidance)
        .unwrap_or(GENERIC_GUIDANCE)
}

/// Builds the generation prompt for one platform of one variant.
///
/// Optional sections appear in a fixed order: audience, emojis, hashtags,
/// SEO, variant hint. The JSON instruction always comes last.
pub fn build_post_prompt(
    request: &GenerationRequest,
    platform: Platform,
    variant_number: u32,
) -> String {
    let label = platform.label();
    let mut prompt = format!(
        "Create a {} {} post for {} about: {}\n\nPlatform Requirements:\n- {}: {}\n\n",
        request.tone_style.as_str().to_lowercase(),
        request.post_type.as_str().to_lowercase(),
        label,
        request.product_description,
        label,
        platform_guidance(platform),
    );

    if let Some(audience) = &request.audience_target {
        let fields = [
            ("Age", &audience.age_range),
            ("Gender", &audience.gender),
            ("Interests", &audience.interests),
            ("Location", &audience.location),
        ];
        let audience_info: Vec<String> = fields
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{name}: {v}"))
            })
            .collect();
        if !audience_info.is_empty() {
            prompt.push_str(&format!("Target Audience: {}\n", audience_info.join(", ")));
        }
    }

    if request.include_emojis {
        prompt.push_str("Include relevant emojis to make the post more engaging.\n");
    }

    if request.include_hashtags {
        prompt.push_str("Include 5-10 relevant hashtags at the end.\n");
    }

    if let Some(keywords) = seo_keywords(request) {
        prompt.push_str(&format!("Include these SEO keywords naturally: {keywords}\n"));
        prompt.push_str("Also provide a meta description for SEO purposes.\n");
    }

    if variant_number > 1 {
        prompt.push_str(&format!(
            "This is variant #{variant_number} - make it different from previous versions while maintaining the same core message.\n"
        ));
    }

    prompt.push('\n');
    prompt.push_str(POST_JSON_INSTRUCTION);
    prompt
}

/// Keywords to weave in, only when SEO optimisation is on and keywords were given.
fn seo_keywords(request: &GenerationRequest) -> Option<&str> {
    if !request.include_seo_optimization {
        return None;
    }
    request
        .seo_keywords
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

pub fn build_rewrite_prompt(original_content: &str, tone: ToneStyle, platform: Platform) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{tone}", tone.as_str())
        .replace("{platform}", &platform.label())
        .replace("{guidance}", platform_guidance(platform))
        .replace("{original_content}", original_content)
}

pub fn build_analysis_prompt(content: &str, platform: Platform) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{platform}", &platform.label())
        .replace("{guidance}", platform_guidance(platform))
        .replace("{content}", content)
}
