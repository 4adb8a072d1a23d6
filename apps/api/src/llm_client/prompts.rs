// Cross-cutting prompt fragments shared by every LLM call.
// Feature-specific templates live next to the feature (see generation::prompts).

/// System instruction sent with every generation, rewrite and analysis call.
pub const MARKETING_SYSTEM: &str = "You are an expert marketing content creator. \
    Generate engaging, platform-optimized content that drives engagement and conversions.";
